use crate::{
    domain::RoleCode,
    model::{User, UserWithRole},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub vendor_code: String,
    pub is_verified: bool,
    pub is_blocked: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// model to response
impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        UserResponse {
            id: value.user_id,
            email: value.email,
            username: value.username,
            full_name: value.full_name,
            company_name: value.company_name,
            phone: value.phone,
            vendor_code: value.vendor_code,
            is_verified: value.is_verified,
            is_blocked: value.is_blocked,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UserProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub role: Option<RoleCode>,
}

impl From<UserWithRole> for UserProfileResponse {
    fn from(value: UserWithRole) -> Self {
        UserProfileResponse {
            role: value.role_code.and_then(|code| code.parse().ok()),
            user: value.user.into(),
        }
    }
}

impl UserProfileResponse {
    pub fn new(user: User, role: Option<RoleCode>) -> Self {
        UserProfileResponse {
            user: user.into(),
            role,
        }
    }
}
