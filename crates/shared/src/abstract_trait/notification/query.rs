use crate::{
    domain::{
        Actor,
        requests::FindAllNotifications,
        responses::{ApiResponse, ApiResponsePagination, NotificationResponse, UnreadCountResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Notification as NotificationModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynNotificationQueryRepository = Arc<dyn NotificationQueryRepositoryTrait + Send + Sync>;
pub type DynNotificationQueryService = Arc<dyn NotificationQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait NotificationQueryRepositoryTrait {
    /// Newest first.
    async fn find_by_user(
        &self,
        user_id: i32,
        req: &FindAllNotifications,
    ) -> Result<(Vec<NotificationModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<NotificationModel>, RepositoryError>;
    async fn count_unread(&self, user_id: i32) -> Result<i64, RepositoryError>;
}

#[async_trait]
pub trait NotificationQueryServiceTrait {
    async fn find_all(
        &self,
        actor: &Actor,
        req: &FindAllNotifications,
    ) -> Result<ApiResponsePagination<Vec<NotificationResponse>>, ServiceError>;
    async fn unread_count(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<UnreadCountResponse>, ServiceError>;
}
