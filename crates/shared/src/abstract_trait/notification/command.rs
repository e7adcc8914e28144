use crate::{
    domain::{
        Actor,
        requests::CreateNotificationRequest,
        responses::{ApiResponse, NotificationResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Notification as NotificationModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynNotificationCommandRepository =
    Arc<dyn NotificationCommandRepositoryTrait + Send + Sync>;
pub type DynNotificationCommandService = Arc<dyn NotificationCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait NotificationCommandRepositoryTrait {
    async fn create_notification(
        &self,
        req: &CreateNotificationRequest,
    ) -> Result<NotificationModel, RepositoryError>;
    async fn mark_read(&self, id: i32) -> Result<NotificationModel, RepositoryError>;
    /// Returns how many notifications flipped to read.
    async fn mark_all_read(&self, user_id: i32) -> Result<u64, RepositoryError>;
    async fn delete_notification(&self, id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait NotificationCommandServiceTrait {
    async fn mark_read(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<NotificationResponse>, ServiceError>;
    async fn mark_all_read(&self, actor: &Actor) -> Result<ApiResponse<u64>, ServiceError>;
    async fn delete_notification(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<()>, ServiceError>;
}
