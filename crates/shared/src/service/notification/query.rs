use crate::{
    abstract_trait::{DynNotificationQueryRepository, NotificationQueryServiceTrait},
    domain::{
        Actor,
        requests::FindAllNotifications,
        responses::{
            ApiResponse, ApiResponsePagination, NotificationResponse, Pagination,
            UnreadCountResponse,
        },
    },
    errors::ServiceError,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

pub struct NotificationQueryService {
    query: DynNotificationQueryRepository,
    metrics: Metrics,
}

impl NotificationQueryService {
    pub async fn new(query: DynNotificationQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "notification_query_service");

        Self { query, metrics }
    }

    async fn list(
        &self,
        actor: &Actor,
        req: &FindAllNotifications,
    ) -> Result<ApiResponsePagination<Vec<NotificationResponse>>, ServiceError> {
        let (notifications, total) = self.query.find_by_user(actor.user_id, req).await?;

        let data = notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect();

        Ok(ApiResponsePagination::ok(
            "Notifications fetched successfully",
            data,
            Pagination::new(req.page, req.page_size, total),
        ))
    }
}

#[async_trait]
impl NotificationQueryServiceTrait for NotificationQueryService {
    async fn find_all(
        &self,
        actor: &Actor,
        req: &FindAllNotifications,
    ) -> Result<ApiResponsePagination<Vec<NotificationResponse>>, ServiceError> {
        info!(
            "🔔 Listing notifications for user ID {} | page {} unread_only {}",
            actor.user_id, req.page, req.unread_only
        );

        let started = Instant::now();
        let result = self.list(actor, req).await;
        self.metrics
            .complete(Method::Get, "FindNotifications", started, &result);

        result
    }

    async fn unread_count(
        &self,
        actor: &Actor,
    ) -> Result<ApiResponse<UnreadCountResponse>, ServiceError> {
        let started = Instant::now();
        let result = self
            .query
            .count_unread(actor.user_id)
            .await
            .map_err(ServiceError::from);
        self.metrics
            .complete(Method::Get, "UnreadCount", started, &result);

        Ok(ApiResponse::ok(
            "Unread count fetched successfully",
            UnreadCountResponse { unread: result? },
        ))
    }
}
