use crate::{
    abstract_trait::{
        DynNotificationCommandRepository, DynRoleCommandRepository, DynRoleQueryRepository,
        DynUserQueryRepository, DynUserRoleRepository, RoleCommandServiceTrait,
    },
    domain::{
        Actor, RoleCode,
        requests::{
            AssignRoleRequest, CreateNotificationRequest, CreateRoleRequest, UpdateRoleRequest,
        },
        responses::{ApiResponse, RoleResponse},
    },
    errors::ServiceError,
    model::Role as RoleModel,
    service::notify,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

pub struct RoleCommandService {
    role_query: DynRoleQueryRepository,
    role_command: DynRoleCommandRepository,
    user_role: DynUserRoleRepository,
    user_query: DynUserQueryRepository,
    notification: DynNotificationCommandRepository,
    metrics: Metrics,
}

pub struct RoleCommandServiceDeps {
    pub role_query: DynRoleQueryRepository,
    pub role_command: DynRoleCommandRepository,
    pub user_role: DynUserRoleRepository,
    pub user_query: DynUserQueryRepository,
    pub notification: DynNotificationCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl RoleCommandService {
    pub async fn new(deps: RoleCommandServiceDeps) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *deps.registry.lock().await, "role_command_service");

        Self {
            role_query: deps.role_query,
            role_command: deps.role_command,
            user_role: deps.user_role,
            user_query: deps.user_query,
            notification: deps.notification,
            metrics,
        }
    }

    async fn role_by_code(&self, code: RoleCode) -> Result<RoleModel, ServiceError> {
        self.role_query
            .find_by_code(code.as_str())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Role '{code}' not found")))
    }

    async fn grant(
        &self,
        actor: &Actor,
        user_id: i32,
        req: &AssignRoleRequest,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError> {
        actor.require_any(&[RoleCode::Hr])?;

        if !actor.is_admin() && !req.role_code.is_staff() {
            return Err(ServiceError::Forbidden(
                "HR can only assign the captain or hr role".into(),
            ));
        }

        if self.user_query.find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "User with id {user_id} not found"
            )));
        }

        let role = self.role_by_code(req.role_code).await?;
        if !role.is_active {
            return Err(ServiceError::validation(format!(
                "Role '{}' is inactive",
                role.role_code
            )));
        }

        self.user_role
            .assign_role(user_id, role.role_id, req.is_primary)
            .await?;

        notify(
            &self.notification,
            CreateNotificationRequest::new(
                user_id,
                "Role assigned",
                format!("You have been assigned the {} role.", role.role_name),
            )
            .related_to("role", role.role_id),
        )
        .await;

        Ok(ApiResponse::ok(
            "Role assigned successfully",
            RoleResponse::from(role),
        ))
    }

    async fn revoke(
        &self,
        actor: &Actor,
        user_id: i32,
        role_code: RoleCode,
    ) -> Result<ApiResponse<()>, ServiceError> {
        actor.require_any(&[RoleCode::Admin])?;

        let role = self.role_by_code(role_code).await?;
        self.user_role.remove_role(user_id, role.role_id).await?;

        Ok(ApiResponse::ok("Role removed successfully", ()))
    }
}

#[async_trait]
impl RoleCommandServiceTrait for RoleCommandService {
    async fn create_role(
        &self,
        actor: &Actor,
        req: &CreateRoleRequest,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError> {
        info!("🏗️ Creating role '{}'", req.name);

        let started = Instant::now();
        let result: Result<RoleModel, ServiceError> = async {
            actor.require_any(&[RoleCode::Admin])?;
            Ok(self.role_command.create_role(req).await?)
        }
        .await;
        self.metrics.complete(Method::Post, "CreateRole", started, &result);

        Ok(ApiResponse::ok(
            "Role created successfully",
            RoleResponse::from(result?),
        ))
    }

    async fn update_role(
        &self,
        actor: &Actor,
        req: &UpdateRoleRequest,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError> {
        info!("🔄 Updating role ID {}", req.id);

        let started = Instant::now();
        let result: Result<RoleModel, ServiceError> = async {
            actor.require_any(&[RoleCode::Admin])?;
            Ok(self.role_command.update_role(req).await?)
        }
        .await;
        self.metrics.complete(Method::Put, "UpdateRole", started, &result);

        Ok(ApiResponse::ok(
            "Role updated successfully",
            RoleResponse::from(result?),
        ))
    }

    async fn deactivate_role(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError> {
        info!("🗑️ Deactivating role ID {id}");

        let started = Instant::now();
        let result: Result<RoleModel, ServiceError> = async {
            actor.require_any(&[RoleCode::Admin])?;
            Ok(self.role_command.deactivate_role(id).await?)
        }
        .await;
        self.metrics
            .complete(Method::Put, "DeactivateRole", started, &result);

        Ok(ApiResponse::ok(
            "Role deactivated successfully",
            RoleResponse::from(result?),
        ))
    }

    async fn assign_role(
        &self,
        actor: &Actor,
        user_id: i32,
        req: &AssignRoleRequest,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError> {
        info!(
            "🎖️ User ID {} assigning {} to user ID {user_id} (primary={})",
            actor.user_id, req.role_code, req.is_primary
        );

        let started = Instant::now();
        let result = self.grant(actor, user_id, req).await;
        self.metrics.complete(Method::Post, "AssignRole", started, &result);

        result
    }

    async fn remove_role(
        &self,
        actor: &Actor,
        user_id: i32,
        role_code: RoleCode,
    ) -> Result<ApiResponse<()>, ServiceError> {
        info!("➖ Removing {role_code} from user ID {user_id}");

        let started = Instant::now();
        let result = self.revoke(actor, user_id, role_code).await;
        self.metrics
            .complete(Method::Delete, "RemoveRole", started, &result);

        result
    }
}
