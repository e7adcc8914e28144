use crate::{
    domain::{
        Actor,
        requests::FindAllUsers,
        responses::{ApiResponse, ApiResponsePagination, UserProfileResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{User as UserModel, UserWithRole},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserQueryRepository = Arc<dyn UserQueryRepositoryTrait + Send + Sync>;
pub type DynUserQueryService = Arc<dyn UserQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserQueryRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllUsers,
    ) -> Result<(Vec<UserWithRole>, i64), RepositoryError>;
    /// Captain and HR accounts; `req.role` narrows to one of them.
    async fn find_staff(
        &self,
        req: &FindAllUsers,
    ) -> Result<(Vec<UserWithRole>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError>;
    async fn find_by_username(&self, username: &str)
    -> Result<Option<UserModel>, RepositoryError>;
}

#[async_trait]
pub trait UserQueryServiceTrait {
    async fn find_all(
        &self,
        actor: &Actor,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserProfileResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<UserProfileResponse>, ServiceError>;
    async fn find_staff(
        &self,
        actor: &Actor,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserProfileResponse>>, ServiceError>;
}
