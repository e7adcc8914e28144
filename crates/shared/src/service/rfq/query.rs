use super::party_of;
use crate::{
    abstract_trait::{DynRfqQueryRepository, RfqQueryServiceTrait},
    domain::{
        Actor, RoleCode,
        requests::{FindAllRfqs, RfqScope},
        responses::{ApiResponse, ApiResponsePagination, Pagination, RfqResponse},
    },
    errors::ServiceError,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

pub struct RfqQueryService {
    query: DynRfqQueryRepository,
    metrics: Metrics,
}

impl RfqQueryService {
    pub async fn new(query: DynRfqQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "rfq_query_service");

        Self { query, metrics }
    }

    async fn list(
        &self,
        actor: &Actor,
        role: RoleCode,
        scope: RfqScope,
        req: &FindAllRfqs,
    ) -> Result<ApiResponsePagination<Vec<RfqResponse>>, ServiceError> {
        actor.require_any(&[role])?;

        let (rfqs, total) = self.query.find_all(scope, req).await?;

        Ok(ApiResponsePagination::ok(
            "RFQs fetched successfully",
            rfqs.into_iter().map(RfqResponse::from).collect(),
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn load(&self, actor: &Actor, id: i32) -> Result<ApiResponse<RfqResponse>, ServiceError> {
        let rfq = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("RFQ with id {id} not found")))?;

        if party_of(actor, &rfq).is_none() {
            return Err(ServiceError::Forbidden(
                "You are not a party to this RFQ".into(),
            ));
        }

        Ok(ApiResponse::ok(
            "RFQ fetched successfully",
            RfqResponse::from(rfq),
        ))
    }
}

#[async_trait]
impl RfqQueryServiceTrait for RfqQueryService {
    async fn find_for_buyer(
        &self,
        actor: &Actor,
        req: &FindAllRfqs,
    ) -> Result<ApiResponsePagination<Vec<RfqResponse>>, ServiceError> {
        info!(
            "📋 Listing RFQs of buyer ID {} | status {:?}",
            actor.user_id, req.status
        );

        let started = Instant::now();
        let result = self
            .list(actor, RoleCode::Buyer, RfqScope::Buyer(actor.user_id), req)
            .await;
        self.metrics
            .complete(Method::Get, "FindBuyerRfqs", started, &result);

        result
    }

    async fn find_for_seller(
        &self,
        actor: &Actor,
        req: &FindAllRfqs,
    ) -> Result<ApiResponsePagination<Vec<RfqResponse>>, ServiceError> {
        info!(
            "📋 Listing RFQs on products of seller ID {} | status {:?}",
            actor.user_id, req.status
        );

        let started = Instant::now();
        let result = self
            .list(actor, RoleCode::Seller, RfqScope::Seller(actor.user_id), req)
            .await;
        self.metrics
            .complete(Method::Get, "FindSellerRfqs", started, &result);

        result
    }

    async fn find_all(
        &self,
        actor: &Actor,
        req: &FindAllRfqs,
    ) -> Result<ApiResponsePagination<Vec<RfqResponse>>, ServiceError> {
        info!("📋 Listing all RFQs | page {} status {:?}", req.page, req.status);

        let started = Instant::now();
        let result = self
            .list(actor, RoleCode::Captain, RfqScope::All, req)
            .await;
        self.metrics.complete(Method::Get, "FindAllRfqs", started, &result);

        result
    }

    async fn find_by_id(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<RfqResponse>, ServiceError> {
        info!("🔍 Fetching RFQ ID {id}");

        let started = Instant::now();
        let result = self.load(actor, id).await;
        self.metrics.complete(Method::Get, "FindRfqById", started, &result);

        result
    }
}
