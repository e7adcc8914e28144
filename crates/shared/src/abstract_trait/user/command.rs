use crate::{
    domain::{
        Actor,
        requests::{CreateStaffRequest, CreateUserRequest, UpdateProfileRequest},
        responses::{ApiResponse, UserProfileResponse, UserResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::User as UserModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;
pub type DynUserCommandService = Arc<dyn UserCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserCommandRepositoryTrait {
    /// Inserts the account together with its primary role; neither row is kept on failure.
    async fn create_user(
        &self,
        req: &CreateUserRequest,
        primary_role_id: i32,
    ) -> Result<UserModel, RepositoryError>;
    async fn update_profile(
        &self,
        user_id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<UserModel, RepositoryError>;
    async fn update_password(
        &self,
        user_id: i32,
        password: &str,
    ) -> Result<UserModel, RepositoryError>;
    async fn update_blocked(
        &self,
        user_id: i32,
        is_blocked: bool,
    ) -> Result<UserModel, RepositoryError>;
    async fn update_verified(
        &self,
        user_id: i32,
        is_verified: bool,
    ) -> Result<UserModel, RepositoryError>;
}

#[async_trait]
pub trait UserCommandServiceTrait {
    async fn block_user(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn unblock_user(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn verify_user(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn update_profile(
        &self,
        actor: &Actor,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn create_staff(
        &self,
        actor: &Actor,
        req: &CreateStaffRequest,
        ip_address: Option<String>,
    ) -> Result<ApiResponse<UserProfileResponse>, ServiceError>;
}
