mod auth;
mod category;
mod notification;
mod product;
mod reset_token;
mod rfq;
mod role;
mod user;

pub use self::auth::{ChangePasswordRequest, LoginRequest, RegisterRequest};
pub use self::category::CreateCategoryRequest;
pub use self::notification::{CreateNotificationRequest, FindAllNotifications};
pub use self::product::{
    CreateProductRequest, FindAllProducts, NewProduct, ProductDecision, ReviewProductRequest,
    UpdateProductRequest,
};
pub use self::reset_token::{
    CreateResetPasswordRequest, CreateResetTokenRequest, ForgotPasswordRequest,
};
pub use self::rfq::{
    CreateRfqRequest, FindAllRfqs, NewRfq, RfqScope, UpdateRfqRequest, UpdateRfqStatusRequest,
};
pub use self::role::{AssignRoleRequest, CreateRoleRequest, UpdateRoleRequest};
pub use self::user::{
    CreateStaffRequest, CreateUserRequest, FindAllUsers, UpdateProfileRequest,
};

pub(crate) fn default_page() -> i32 {
    1
}

pub(crate) fn default_page_size() -> i32 {
    10
}
