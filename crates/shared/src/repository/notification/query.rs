use crate::{
    abstract_trait::NotificationQueryRepositoryTrait,
    config::ConnectionPool,
    domain::{requests::FindAllNotifications, responses::Pagination},
    errors::RepositoryError,
    model::Notification as NotificationModel,
};
use async_trait::async_trait;
use sqlx::FromRow;
use tracing::{error, info};

#[derive(FromRow)]
struct NotificationPageRow {
    #[sqlx(flatten)]
    notification: NotificationModel,
    total_count: i64,
}

pub struct NotificationQueryRepository {
    db: ConnectionPool,
}

impl NotificationQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationQueryRepositoryTrait for NotificationQueryRepository {
    async fn find_by_user(
        &self,
        user_id: i32,
        req: &FindAllNotifications,
    ) -> Result<(Vec<NotificationModel>, i64), RepositoryError> {
        let (limit, offset) = Pagination::limit_offset(req.page, req.page_size);

        let rows = sqlx::query_as::<_, NotificationPageRow>(
            r#"
            SELECT *, COUNT(*) OVER() AS total_count
            FROM notifications
            WHERE user_id = $1 AND (NOT $2 OR NOT is_read)
            ORDER BY created_at DESC, notification_id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(req.unread_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch notifications of user ID {user_id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total = rows.first().map(|r| r.total_count).unwrap_or(0);
        info!("✅ Retrieved {} notifications for user ID {user_id}", rows.len());

        Ok((rows.into_iter().map(|r| r.notification).collect(), total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<NotificationModel>, RepositoryError> {
        sqlx::query_as::<_, NotificationModel>(
            "SELECT * FROM notifications WHERE notification_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch notification ID {id}: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn count_unread(&self, user_id: i32) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to count unread notifications: {:?}", e);
            RepositoryError::from(e)
        })
    }
}
