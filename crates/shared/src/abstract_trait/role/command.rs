use crate::{
    domain::{
        Actor, RoleCode,
        requests::{AssignRoleRequest, CreateRoleRequest, UpdateRoleRequest},
        responses::{ApiResponse, RoleResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Role as RoleModel, UserRole as UserRoleModel},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynRoleCommandRepository = Arc<dyn RoleCommandRepositoryTrait + Send + Sync>;
pub type DynUserRoleRepository = Arc<dyn UserRoleRepositoryTrait + Send + Sync>;
pub type DynRoleCommandService = Arc<dyn RoleCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait RoleCommandRepositoryTrait {
    async fn create_role(&self, req: &CreateRoleRequest) -> Result<RoleModel, RepositoryError>;
    async fn update_role(&self, req: &UpdateRoleRequest) -> Result<RoleModel, RepositoryError>;
    async fn deactivate_role(&self, id: i32) -> Result<RoleModel, RepositoryError>;
}

#[async_trait]
pub trait UserRoleRepositoryTrait {
    /// Upserts the link; a primary assignment clears the user's previous primary flag.
    async fn assign_role(
        &self,
        user_id: i32,
        role_id: i32,
        is_primary: bool,
    ) -> Result<UserRoleModel, RepositoryError>;
    /// `Err(RepositoryError::NotFound)` when the user does not hold the role.
    async fn remove_role(&self, user_id: i32, role_id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait RoleCommandServiceTrait {
    async fn create_role(
        &self,
        actor: &Actor,
        req: &CreateRoleRequest,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError>;
    async fn update_role(
        &self,
        actor: &Actor,
        req: &UpdateRoleRequest,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError>;
    async fn deactivate_role(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError>;
    async fn assign_role(
        &self,
        actor: &Actor,
        user_id: i32,
        req: &AssignRoleRequest,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError>;
    async fn remove_role(
        &self,
        actor: &Actor,
        user_id: i32,
        role_code: RoleCode,
    ) -> Result<ApiResponse<()>, ServiceError>;
}
