use crate::{
    abstract_trait::{
        DynNotificationCommandRepository, DynNotificationQueryRepository,
        NotificationCommandServiceTrait,
    },
    domain::{
        Actor,
        responses::{ApiResponse, NotificationResponse},
    },
    errors::ServiceError,
    model::Notification as NotificationModel,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

pub struct NotificationCommandService {
    query: DynNotificationQueryRepository,
    command: DynNotificationCommandRepository,
    metrics: Metrics,
}

impl NotificationCommandService {
    pub async fn new(
        query: DynNotificationQueryRepository,
        command: DynNotificationCommandRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "notification_command_service");

        Self {
            query,
            command,
            metrics,
        }
    }

    // Someone else's notification reads as missing.
    async fn owned(&self, actor: &Actor, id: i32) -> Result<NotificationModel, ServiceError> {
        self.query
            .find_by_id(id)
            .await?
            .filter(|n| n.user_id == actor.user_id)
            .ok_or_else(|| ServiceError::NotFound(format!("Notification with id {id} not found")))
    }

    async fn read_one(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<NotificationResponse>, ServiceError> {
        self.owned(actor, id).await?;
        let notification = self.command.mark_read(id).await?;

        Ok(ApiResponse::ok(
            "Notification marked as read",
            NotificationResponse::from(notification),
        ))
    }

    async fn remove(&self, actor: &Actor, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        self.owned(actor, id).await?;
        self.command.delete_notification(id).await?;

        Ok(ApiResponse::ok("Notification deleted successfully", ()))
    }
}

#[async_trait]
impl NotificationCommandServiceTrait for NotificationCommandService {
    async fn mark_read(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<NotificationResponse>, ServiceError> {
        info!("📬 User ID {} reading notification ID {id}", actor.user_id);

        let started = Instant::now();
        let result = self.read_one(actor, id).await;
        self.metrics.complete(Method::Put, "MarkRead", started, &result);

        result
    }

    async fn mark_all_read(&self, actor: &Actor) -> Result<ApiResponse<u64>, ServiceError> {
        info!("📭 Marking all notifications read for user ID {}", actor.user_id);

        let started = Instant::now();
        let result = self
            .command
            .mark_all_read(actor.user_id)
            .await
            .map_err(ServiceError::from);
        self.metrics
            .complete(Method::Put, "MarkAllRead", started, &result);

        Ok(ApiResponse::ok("All notifications marked as read", result?))
    }

    async fn delete_notification(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ User ID {} deleting notification ID {id}", actor.user_id);

        let started = Instant::now();
        let result = self.remove(actor, id).await;
        self.metrics
            .complete(Method::Delete, "DeleteNotification", started, &result);

        result
    }
}
