use crate::{
    domain::{
        Actor,
        requests::{
            ChangePasswordRequest, CreateResetPasswordRequest, ForgotPasswordRequest,
            LoginRequest, RegisterRequest,
        },
        responses::{ApiResponse, LoginResponse, UserProfileResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynRegisterService = Arc<dyn RegisterServiceTrait + Send + Sync>;
pub type DynLoginService = Arc<dyn LoginServiceTrait + Send + Sync>;
pub type DynIdentityService = Arc<dyn IdentityServiceTrait + Send + Sync>;
pub type DynPasswordResetService = Arc<dyn PasswordResetServiceTrait + Send + Sync>;

#[async_trait]
pub trait RegisterServiceTrait {
    async fn register(
        &self,
        request: &RegisterRequest,
        ip_address: Option<String>,
    ) -> Result<ApiResponse<UserProfileResponse>, ServiceError>;
}

#[async_trait]
pub trait LoginServiceTrait {
    async fn login(&self, request: &LoginRequest)
    -> Result<ApiResponse<LoginResponse>, ServiceError>;
}

#[async_trait]
pub trait IdentityServiceTrait {
    async fn get_me(&self, actor: &Actor) -> Result<ApiResponse<UserProfileResponse>, ServiceError>;
    async fn change_password(
        &self,
        actor: &Actor,
        request: &ChangePasswordRequest,
    ) -> Result<ApiResponse<()>, ServiceError>;
}

#[async_trait]
pub trait PasswordResetServiceTrait {
    async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<ApiResponse<()>, ServiceError>;
    async fn reset_password(
        &self,
        request: &CreateResetPasswordRequest,
    ) -> Result<ApiResponse<()>, ServiceError>;
}
