use crate::{
    abstract_trait::NotificationCommandRepositoryTrait, config::ConnectionPool,
    domain::requests::CreateNotificationRequest, errors::RepositoryError,
    model::Notification as NotificationModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct NotificationCommandRepository {
    db: ConnectionPool,
}

impl NotificationCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationCommandRepositoryTrait for NotificationCommandRepository {
    async fn create_notification(
        &self,
        req: &CreateNotificationRequest,
    ) -> Result<NotificationModel, RepositoryError> {
        let notification = sqlx::query_as::<_, NotificationModel>(
            r#"
            INSERT INTO notifications (
                user_id, title, message, related_entity_type, related_entity_id
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(req.user_id)
        .bind(&req.title)
        .bind(&req.message)
        .bind(&req.related_entity_type)
        .bind(req.related_entity_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to notify user ID {}: {:?}", req.user_id, e);
            RepositoryError::from(e)
        })?;

        info!("🔔 Notified user ID {}: {}", req.user_id, req.title);
        Ok(notification)
    }

    async fn mark_read(&self, id: i32) -> Result<NotificationModel, RepositoryError> {
        sqlx::query_as::<_, NotificationModel>(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE notification_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to mark notification ID {id} read: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn mark_all_read(&self, user_id: i32) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to mark notifications read for user ID {user_id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("📭 Marked {} notifications read for user ID {user_id}", result.rows_affected());
        Ok(result.rows_affected())
    }

    async fn delete_notification(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM notifications WHERE notification_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete notification ID {id}: {:?}", e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
