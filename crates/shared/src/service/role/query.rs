use crate::{
    abstract_trait::{DynRoleQueryRepository, RoleQueryServiceTrait},
    domain::responses::{ApiResponse, RoleResponse},
    errors::ServiceError,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

pub struct RoleQueryService {
    query: DynRoleQueryRepository,
    metrics: Metrics,
}

impl RoleQueryService {
    pub async fn new(query: DynRoleQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "role_query_service");

        Self { query, metrics }
    }
}

#[async_trait]
impl RoleQueryServiceTrait for RoleQueryService {
    async fn find_active(&self) -> Result<ApiResponse<Vec<RoleResponse>>, ServiceError> {
        info!("🔍 Listing active roles");

        let started = Instant::now();
        let result = self
            .query
            .find_active()
            .await
            .map_err(ServiceError::from)
            .map(|roles| {
                ApiResponse::ok(
                    "Roles fetched successfully",
                    roles.into_iter().map(RoleResponse::from).collect(),
                )
            });
        self.metrics.complete(Method::Get, "FindActiveRoles", started, &result);

        result
    }
}
