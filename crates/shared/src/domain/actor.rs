use crate::{domain::RoleCode, errors::ServiceError};

/// The authenticated caller, decoded from the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i32,
    pub role: RoleCode,
}

impl Actor {
    pub fn new(user_id: i32, role: RoleCode) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == RoleCode::Admin
    }

    /// Captains moderate on behalf of the platform; admins may do anything a captain can.
    pub fn is_moderator(&self) -> bool {
        matches!(self.role, RoleCode::Captain | RoleCode::Admin)
    }

    pub fn has_any(&self, roles: &[RoleCode]) -> bool {
        self.is_admin() || roles.contains(&self.role)
    }

    /// `Err(ServiceError::Forbidden)` unless the caller holds one of `roles` (or is admin).
    pub fn require_any(&self, roles: &[RoleCode]) -> Result<(), ServiceError> {
        if self.has_any(roles) {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(
                "You do not have permission to perform this action".to_string(),
            ))
        }
    }
}
