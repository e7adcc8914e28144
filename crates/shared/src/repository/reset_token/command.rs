use crate::{
    abstract_trait::ResetTokenCommandRepositoryTrait, config::ConnectionPool,
    domain::requests::CreateResetTokenRequest, errors::RepositoryError,
    model::ResetToken as ResetTokenModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct ResetTokenCommandRepository {
    db: ConnectionPool,
}

impl ResetTokenCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResetTokenCommandRepositoryTrait for ResetTokenCommandRepository {
    async fn create_reset_token(
        &self,
        request: &CreateResetTokenRequest,
    ) -> Result<ResetTokenModel, RepositoryError> {
        let token = sqlx::query_as::<_, ResetTokenModel>(
            r#"
            INSERT INTO password_reset_tokens (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            RETURNING reset_token_id, user_id, token, expires_at, used, created_at
            "#,
        )
        .bind(request.user_id)
        .bind(&request.token)
        .bind(request.expires_at)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to store reset token for user_id={}: {:?}", request.user_id, e);
            RepositoryError::from(e)
        })?;

        info!("✅ Stored reset token for user_id={}", token.user_id);
        Ok(token)
    }

    async fn mark_used(&self, reset_token_id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE password_reset_tokens SET used = TRUE WHERE reset_token_id = $1",
        )
        .bind(reset_token_id)
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to consume reset token {reset_token_id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_unused_by_user(&self, user_id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM password_reset_tokens WHERE user_id = $1 AND NOT used",
        )
        .bind(user_id)
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to clear reset tokens for user_id={user_id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!(
            "🧹 Cleared {} pending reset tokens for user_id={user_id}",
            result.rows_affected()
        );
        Ok(())
    }
}
