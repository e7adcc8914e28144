use crate::{
    abstract_trait::{
        DynEmailService, DynHashing, DynResetTokenCommandRepository,
        DynResetTokenQueryRepository, DynUserCommandRepository, DynUserQueryRepository,
        EmailRequest, PasswordResetServiceTrait,
    },
    domain::{
        requests::{CreateResetPasswordRequest, CreateResetTokenRequest, ForgotPasswordRequest},
        responses::ApiResponse,
    },
    errors::ServiceError,
    utils::{Method, Metrics, generate_random_string},
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};

const RESET_TOKEN_LENGTH: usize = 48;
const RESET_TOKEN_TTL_HOURS: i64 = 1;

pub struct PasswordResetService {
    hash: DynHashing,
    mailer: DynEmailService,
    frontend_url: String,
    user_query: DynUserQueryRepository,
    user_command: DynUserCommandRepository,
    reset_query: DynResetTokenQueryRepository,
    reset_command: DynResetTokenCommandRepository,
    metrics: Metrics,
}

pub struct PasswordResetServiceDeps {
    pub hash: DynHashing,
    pub mailer: DynEmailService,
    pub frontend_url: String,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub reset_query: DynResetTokenQueryRepository,
    pub reset_command: DynResetTokenCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl PasswordResetService {
    pub async fn new(deps: PasswordResetServiceDeps) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *deps.registry.lock().await, "password_reset_service");

        Self {
            hash: deps.hash,
            mailer: deps.mailer,
            frontend_url: deps.frontend_url.trim_end_matches('/').to_string(),
            user_query: deps.user_query,
            user_command: deps.user_command,
            reset_query: deps.reset_query,
            reset_command: deps.reset_command,
            metrics,
        }
    }

    async fn issue_token(&self, request: &ForgotPasswordRequest) -> Result<(), ServiceError> {
        let email = request.email.trim().to_lowercase();

        let Some(user) = self.user_query.find_by_email(&email).await? else {
            info!("🔍 Password reset requested for unknown email");
            return Ok(());
        };

        self.reset_command.delete_unused_by_user(user.user_id).await?;

        let token = generate_random_string(RESET_TOKEN_LENGTH)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        self.reset_command
            .create_reset_token(&CreateResetTokenRequest {
                user_id: user.user_id,
                token: token.clone(),
                expires_at: (Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS)).naive_utc(),
            })
            .await?;

        let link = format!("{}/reset-password?token={token}", self.frontend_url);
        let email_request = EmailRequest {
            to: user.email.clone(),
            subject: "Reset your MarsaFyi password".to_string(),
            body: format!(
                "Hello {},\n\nUse the link below to choose a new password. \
                 It expires in {RESET_TOKEN_TTL_HOURS} hour.\n\n{link}\n\n\
                 If you did not ask for this, you can ignore this email.",
                user.full_name
            ),
        };

        if let Err(err) = self.mailer.send(&email_request).await {
            error!("❌ Failed to send reset email to user ID {}: {err}", user.user_id);
        }

        Ok(())
    }

    async fn consume_token(&self, request: &CreateResetPasswordRequest) -> Result<(), ServiceError> {
        let reset = self
            .reset_query
            .find_by_token(request.token.trim())
            .await?
            .filter(|reset| !reset.used)
            .ok_or_else(|| ServiceError::validation("Invalid or already used reset token"))?;

        if reset.expires_at < Utc::now().naive_utc() {
            return Err(ServiceError::TokenExpired);
        }

        let hashed = self.hash.hash_password(&request.password).await?;
        self.user_command
            .update_password(reset.user_id, &hashed)
            .await?;
        self.reset_command.mark_used(reset.reset_token_id).await?;

        info!("🔑 Password reset for user ID {}", reset.user_id);
        Ok(())
    }
}

#[async_trait]
impl PasswordResetServiceTrait for PasswordResetService {
    async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<ApiResponse<()>, ServiceError> {
        let started = Instant::now();
        let result = self.issue_token(request).await;
        self.metrics
            .complete(Method::Post, "ForgotPassword", started, &result);

        result?;

        Ok(ApiResponse::ok(
            "If the email is registered, a reset link has been sent",
            (),
        ))
    }

    async fn reset_password(
        &self,
        request: &CreateResetPasswordRequest,
    ) -> Result<ApiResponse<()>, ServiceError> {
        let started = Instant::now();
        let result = self.consume_token(request).await;
        self.metrics
            .complete(Method::Post, "ResetPassword", started, &result);

        result?;

        Ok(ApiResponse::ok("Password has been reset successfully", ()))
    }
}
