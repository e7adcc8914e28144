use crate::{
    abstract_trait::{
        DynHashing, DynRoleQueryRepository, DynUserCommandRepository, DynUserQueryRepository,
        IdentityServiceTrait,
    },
    domain::{
        Actor,
        requests::ChangePasswordRequest,
        responses::{ApiResponse, UserProfileResponse},
    },
    errors::ServiceError,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

pub struct IdentityService {
    hash: DynHashing,
    user_query: DynUserQueryRepository,
    user_command: DynUserCommandRepository,
    role_query: DynRoleQueryRepository,
    metrics: Metrics,
}

pub struct IdentityServiceDeps {
    pub hash: DynHashing,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub role_query: DynRoleQueryRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl IdentityService {
    pub async fn new(deps: IdentityServiceDeps) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *deps.registry.lock().await, "identity_service");

        Self {
            hash: deps.hash,
            user_query: deps.user_query,
            user_command: deps.user_command,
            role_query: deps.role_query,
            metrics,
        }
    }

    async fn load_profile(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<UserProfileResponse>, ServiceError> {
        let user = self
            .user_query
            .find_by_id(actor.user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;

        let role = self
            .role_query
            .find_primary_by_user(user.user_id)
            .await?
            .and_then(|role| role.role_code.parse().ok());

        Ok(ApiResponse::ok(
            "User fetched successfully",
            UserProfileResponse::new(user, role),
        ))
    }

    async fn replace_password(
        &self,
        actor: &Actor,
        request: &ChangePasswordRequest,
    ) -> Result<ApiResponse<()>, ServiceError> {
        let user = self
            .user_query
            .find_by_id(actor.user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;

        self.hash
            .compare_password(&user.password, &request.current_password)
            .await
            .map_err(|_| ServiceError::validation("Current password is incorrect"))?;

        let hashed = self.hash.hash_password(&request.new_password).await?;
        self.user_command
            .update_password(user.user_id, &hashed)
            .await?;

        Ok(ApiResponse::ok("Password changed successfully", ()))
    }
}

#[async_trait]
impl IdentityServiceTrait for IdentityService {
    async fn get_me(&self, actor: &Actor) -> Result<ApiResponse<UserProfileResponse>, ServiceError> {
        info!("👤 Fetching profile of user ID {}", actor.user_id);

        let started = Instant::now();
        let result = self.load_profile(actor).await;
        self.metrics.complete(Method::Get, "GetMe", started, &result);

        result
    }

    async fn change_password(
        &self,
        actor: &Actor,
        request: &ChangePasswordRequest,
    ) -> Result<ApiResponse<()>, ServiceError> {
        info!("🔑 Changing password of user ID {}", actor.user_id);

        let started = Instant::now();
        let result = self.replace_password(actor, request).await;
        self.metrics
            .complete(Method::Post, "ChangePassword", started, &result);

        result
    }
}
