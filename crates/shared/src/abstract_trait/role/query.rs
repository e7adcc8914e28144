use crate::{
    domain::responses::{ApiResponse, RoleResponse},
    errors::{RepositoryError, ServiceError},
    model::Role as RoleModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynRoleQueryRepository = Arc<dyn RoleQueryRepositoryTrait + Send + Sync>;
pub type DynRoleQueryService = Arc<dyn RoleQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait RoleQueryRepositoryTrait {
    async fn find_active(&self) -> Result<Vec<RoleModel>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<RoleModel>, RepositoryError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<RoleModel>, RepositoryError>;
    /// The role flagged `is_primary` for the user.
    async fn find_primary_by_user(&self, user_id: i32)
    -> Result<Option<RoleModel>, RepositoryError>;
}

#[async_trait]
pub trait RoleQueryServiceTrait {
    async fn find_active(&self) -> Result<ApiResponse<Vec<RoleResponse>>, ServiceError>;
}
