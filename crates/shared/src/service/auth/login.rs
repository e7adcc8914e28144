use crate::{
    abstract_trait::{
        DynHashing, DynJwtService, DynRoleQueryRepository, DynUserQueryRepository,
        LoginServiceTrait,
    },
    config::ACCESS_TOKEN_TTL_HOURS,
    domain::{
        RoleCode,
        requests::LoginRequest,
        responses::{ApiResponse, LoginResponse, UserProfileResponse},
    },
    errors::ServiceError,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};

pub struct LoginService {
    hash: DynHashing,
    jwt: DynJwtService,
    user_query: DynUserQueryRepository,
    role_query: DynRoleQueryRepository,
    metrics: Metrics,
}

pub struct LoginServiceDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub user_query: DynUserQueryRepository,
    pub role_query: DynRoleQueryRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl LoginService {
    pub async fn new(deps: LoginServiceDeps) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *deps.registry.lock().await, "login_service");

        Self {
            hash: deps.hash,
            jwt: deps.jwt,
            user_query: deps.user_query,
            role_query: deps.role_query,
            metrics,
        }
    }

    async fn authenticate(
        &self,
        request: &LoginRequest,
    ) -> Result<ApiResponse<LoginResponse>, ServiceError> {
        let identifier = request.identifier.trim();

        // Usernames never contain '@', so the identifier picks exactly one column.
        let found = if identifier.contains('@') {
            self.user_query.find_by_email(identifier).await?
        } else {
            self.user_query.find_by_username(identifier).await?
        };

        let Some(user) = found else {
            error!("❌ No account matches identifier: {identifier}");
            return Err(ServiceError::InvalidCredentials);
        };

        if self
            .hash
            .compare_password(&user.password, &request.password)
            .await
            .is_err()
        {
            error!("❌ Invalid password for user ID {}", user.user_id);
            return Err(ServiceError::InvalidCredentials);
        }

        if user.is_blocked {
            error!("🚫 Blocked user ID {} attempted to log in", user.user_id);
            return Err(ServiceError::Blocked);
        }

        let role = self
            .role_query
            .find_primary_by_user(user.user_id)
            .await?
            .and_then(|role| role.role_code.parse::<RoleCode>().ok())
            .ok_or_else(|| ServiceError::Forbidden("No role assigned to this account".into()))?;

        let access_token = self.jwt.generate_token(user.user_id, role)?;

        info!("✅ Login successful for user ID {} as {role}", user.user_id);

        Ok(ApiResponse::ok(
            "Login successful",
            LoginResponse {
                access_token,
                token_type: "Bearer".to_string(),
                expires_in: ACCESS_TOKEN_TTL_HOURS * 3600,
                user: UserProfileResponse::new(user, Some(role)),
            },
        ))
    }
}

#[async_trait]
impl LoginServiceTrait for LoginService {
    async fn login(
        &self,
        request: &LoginRequest,
    ) -> Result<ApiResponse<LoginResponse>, ServiceError> {
        info!("🔐 Attempting login for: {}", request.identifier);

        let started = Instant::now();
        let result = self.authenticate(request).await;
        self.metrics.complete(Method::Post, "Login", started, &result);

        result
    }
}
