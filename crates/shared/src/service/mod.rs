mod auth;
mod category;
mod dashboard;
mod notification;
mod product;
mod rfq;
mod role;
mod user;

pub use self::auth::{AuthService, AuthServiceDeps};
pub use self::category::CategoryService;
pub use self::dashboard::DashboardService;
pub use self::notification::NotificationService;
pub use self::product::{ProductService, ProductServiceDeps};
pub use self::rfq::{RfqService, RfqServiceDeps};
pub use self::role::{RoleService, RoleServiceDeps};
pub use self::user::{UserService, UserServiceDeps};

pub(crate) use self::notification::notify;

use crate::{
    abstract_trait::DynUserCommandRepository,
    domain::{RoleCode, requests::CreateUserRequest},
    errors::{RepositoryError, ServiceError},
    model::User as UserModel,
    utils::generate_vendor_code,
};
use tracing::warn;

const VENDOR_CODE_ATTEMPTS: usize = 3;

/// Inserts the account and its primary role with a fresh vendor code, retrying when the random code collides.
pub(crate) async fn insert_with_vendor_code(
    user_command: &DynUserCommandRepository,
    mut req: CreateUserRequest,
    role: RoleCode,
    role_id: i32,
) -> Result<UserModel, ServiceError> {
    let mut attempt = 1;

    loop {
        req.vendor_code =
            generate_vendor_code(role).map_err(|e| ServiceError::Internal(e.to_string()))?;

        match user_command.create_user(&req, role_id).await {
            Err(RepositoryError::AlreadyExists(constraint))
                if constraint.contains("vendor_code") && attempt < VENDOR_CODE_ATTEMPTS =>
            {
                warn!("⚠️ Vendor code collision on attempt {attempt}, retrying");
                attempt += 1;
            }
            other => return other.map_err(ServiceError::from),
        }
    }
}
