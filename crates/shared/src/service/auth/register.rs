use crate::{
    abstract_trait::{
        DynHashing, DynRoleQueryRepository, DynUserCommandRepository, DynUserQueryRepository,
        RegisterServiceTrait,
    },
    domain::{
        requests::{CreateUserRequest, RegisterRequest},
        responses::{ApiResponse, UserProfileResponse},
    },
    errors::ServiceError,
    service::insert_with_vendor_code,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

pub struct RegisterService {
    hash: DynHashing,
    user_query: DynUserQueryRepository,
    user_command: DynUserCommandRepository,
    role_query: DynRoleQueryRepository,
    metrics: Metrics,
}

pub struct RegisterServiceDeps {
    pub hash: DynHashing,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub role_query: DynRoleQueryRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl RegisterService {
    pub async fn new(deps: RegisterServiceDeps) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *deps.registry.lock().await, "register_service");

        Self {
            hash: deps.hash,
            user_query: deps.user_query,
            user_command: deps.user_command,
            role_query: deps.role_query,
            metrics,
        }
    }

    async fn register_user(
        &self,
        req: &RegisterRequest,
        ip_address: Option<String>,
    ) -> Result<ApiResponse<UserProfileResponse>, ServiceError> {
        if !req.role.is_self_service() {
            return Err(ServiceError::validation(
                "Only buyer or seller accounts can be registered",
            ));
        }

        let email = req.email.trim().to_lowercase();
        let username = req.username.trim().to_string();

        if username.contains('@') {
            return Err(ServiceError::validation("Username cannot contain '@'"));
        }

        if self.user_query.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::Conflict("Email already registered".into()));
        }

        if self.user_query.find_by_username(&username).await?.is_some() {
            return Err(ServiceError::Conflict("Username already taken".into()));
        }

        let role = self
            .role_query
            .find_by_code(req.role.as_str())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Role '{}' not found", req.role)))?;

        let password = self.hash.hash_password(&req.password).await?;

        let new_user = CreateUserRequest {
            email,
            username,
            password,
            full_name: req.full_name.trim().to_string(),
            company_name: req.company_name.clone(),
            phone: req.phone.clone(),
            vendor_code: String::new(),
            ip_address,
            is_verified: false,
        };

        let user =
            insert_with_vendor_code(&self.user_command, new_user, req.role, role.role_id).await?;

        info!("✅ Registered {} as {} ({})", user.email, req.role, user.vendor_code);

        Ok(ApiResponse::ok(
            "User registered successfully",
            UserProfileResponse::new(user, Some(req.role)),
        ))
    }
}

#[async_trait]
impl RegisterServiceTrait for RegisterService {
    async fn register(
        &self,
        request: &RegisterRequest,
        ip_address: Option<String>,
    ) -> Result<ApiResponse<UserProfileResponse>, ServiceError> {
        info!("📝 Registering new {} account: {}", request.role, request.email);

        let started = Instant::now();
        let result = self.register_user(request, ip_address).await;
        self.metrics
            .complete(Method::Post, "Register", started, &result);

        result
    }
}
