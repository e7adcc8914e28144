use crate::{
    abstract_trait::{
        DynHashing, DynNotificationCommandRepository, DynRoleQueryRepository,
        DynUserCommandRepository, DynUserQueryRepository, UserCommandServiceTrait,
    },
    domain::{
        Actor, RoleCode,
        requests::{
            CreateNotificationRequest, CreateStaffRequest, CreateUserRequest, UpdateProfileRequest,
        },
        responses::{ApiResponse, UserProfileResponse, UserResponse},
    },
    errors::ServiceError,
    service::{insert_with_vendor_code, notify},
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

pub struct UserCommandService {
    hash: DynHashing,
    user_query: DynUserQueryRepository,
    user_command: DynUserCommandRepository,
    role_query: DynRoleQueryRepository,
    notification: DynNotificationCommandRepository,
    metrics: Metrics,
}

pub struct UserCommandServiceDeps {
    pub hash: DynHashing,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub role_query: DynRoleQueryRepository,
    pub notification: DynNotificationCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

#[derive(Debug, Clone, Copy)]
enum AccountFlag {
    Blocked(bool),
    Verified,
}

impl UserCommandService {
    pub async fn new(deps: UserCommandServiceDeps) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *deps.registry.lock().await, "user_command_service");

        Self {
            hash: deps.hash,
            user_query: deps.user_query,
            user_command: deps.user_command,
            role_query: deps.role_query,
            notification: deps.notification,
            metrics,
        }
    }

    async fn set_flag(
        &self,
        actor: &Actor,
        id: i32,
        flag: AccountFlag,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        actor.require_any(&[RoleCode::Admin])?;

        if matches!(flag, AccountFlag::Blocked(true)) && actor.user_id == id {
            return Err(ServiceError::validation("You cannot block your own account"));
        }

        if self.user_query.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("User with id {id} not found")));
        }

        let (user, message) = match flag {
            AccountFlag::Blocked(true) => (
                self.user_command.update_blocked(id, true).await?,
                "User blocked successfully",
            ),
            AccountFlag::Blocked(false) => (
                self.user_command.update_blocked(id, false).await?,
                "User unblocked successfully",
            ),
            AccountFlag::Verified => (
                self.user_command.update_verified(id, true).await?,
                "User verified successfully",
            ),
        };

        Ok(ApiResponse::ok(message, UserResponse::from(user)))
    }

    async fn add_staff(
        &self,
        actor: &Actor,
        req: &CreateStaffRequest,
        ip_address: Option<String>,
    ) -> Result<ApiResponse<UserProfileResponse>, ServiceError> {
        actor.require_any(&[RoleCode::Hr])?;

        if !req.role.is_staff() {
            return Err(ServiceError::validation(
                "Staff accounts must be captain or hr",
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
            company_name: Some("MarsaFyi".to_string()),
            phone: req.phone.clone(),
            vendor_code: String::new(),
            ip_address,
            is_verified: true,
        };

        let user =
            insert_with_vendor_code(&self.user_command, new_user, req.role, role.role_id).await?;

        notify(
            &self.notification,
            CreateNotificationRequest::new(
                user.user_id,
                "Welcome to MarsaFyi",
                format!(
                    "Your {} account has been created. Your vendor code is {}.",
                    role.role_name, user.vendor_code
                ),
            )
            .related_to("user", user.user_id),
        )
        .await;

        Ok(ApiResponse::ok(
            "Staff account created successfully",
            UserProfileResponse::new(user, Some(req.role)),
        ))
    }

    async fn edit_profile(
        &self,
        actor: &Actor,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let user = self
            .user_command
            .update_profile(actor.user_id, req)
            .await?;

        Ok(ApiResponse::ok(
            "Profile updated successfully",
            UserResponse::from(user),
        ))
    }
}

#[async_trait]
impl UserCommandServiceTrait for UserCommandService {
    async fn block_user(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("🚫 User ID {} blocking user ID {id}", actor.user_id);

        let started = Instant::now();
        let result = self.set_flag(actor, id, AccountFlag::Blocked(true)).await;
        self.metrics.complete(Method::Put, "BlockUser", started, &result);

        result
    }

    async fn unblock_user(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("♻️ User ID {} unblocking user ID {id}", actor.user_id);

        let started = Instant::now();
        let result = self.set_flag(actor, id, AccountFlag::Blocked(false)).await;
        self.metrics.complete(Method::Put, "UnblockUser", started, &result);

        result
    }

    async fn verify_user(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("✔️ User ID {} verifying user ID {id}", actor.user_id);

        let started = Instant::now();
        let result = self.set_flag(actor, id, AccountFlag::Verified).await;
        self.metrics.complete(Method::Put, "VerifyUser", started, &result);

        result
    }

    async fn update_profile(
        &self,
        actor: &Actor,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("✏️ Updating profile of user ID {}", actor.user_id);

        let started = Instant::now();
        let result = self.edit_profile(actor, req).await;
        self.metrics.complete(Method::Put, "UpdateProfile", started, &result);

        result
    }

    async fn create_staff(
        &self,
        actor: &Actor,
        req: &CreateStaffRequest,
        ip_address: Option<String>,
    ) -> Result<ApiResponse<UserProfileResponse>, ServiceError> {
        info!("👷 User ID {} creating {} account {}", actor.user_id, req.role, req.email);

        let started = Instant::now();
        let result = self.add_staff(actor, req, ip_address).await;
        self.metrics.complete(Method::Post, "CreateStaff", started, &result);

        result
    }
}
