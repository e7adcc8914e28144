use crate::{
    abstract_trait::{DynProductQueryRepository, ProductQueryServiceTrait},
    domain::{
        Actor, ProductStatus, RoleCode,
        requests::FindAllProducts,
        responses::{ApiResponse, ApiResponsePagination, Pagination, ProductResponse},
    },
    errors::ServiceError,
    model::Product as ProductModel,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

pub struct ProductQueryService {
    query: DynProductQueryRepository,
    metrics: Metrics,
}

fn page(
    (products, total): (Vec<ProductModel>, i64),
    req: &FindAllProducts,
) -> ApiResponsePagination<Vec<ProductResponse>> {
    ApiResponsePagination::ok(
        "Products fetched successfully",
        products.into_iter().map(ProductResponse::from).collect(),
        Pagination::new(req.page, req.page_size, total),
    )
}

/// Approved, active products are public; everything else is limited to its seller and moderators.
fn visible_to(product: &ProductModel, actor: Option<&Actor>) -> bool {
    let public = product.is_active && product.status == ProductStatus::Approved.as_str();

    public
        || actor.is_some_and(|actor| actor.is_moderator() || actor.user_id == product.seller_id)
}

impl ProductQueryService {
    pub async fn new(query: DynProductQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "product_query_service");

        Self { query, metrics }
    }

    async fn load(
        &self,
        actor: Option<&Actor>,
        id: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let product = self
            .query
            .find_by_id(id)
            .await?
            .filter(|product| visible_to(product, actor))
            .ok_or_else(|| ServiceError::NotFound(format!("Product with id {id} not found")))?;

        Ok(ApiResponse::ok(
            "Product fetched successfully",
            ProductResponse::from(product),
        ))
    }

    async fn own(
        &self,
        actor: &Actor,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        actor.require_any(&[RoleCode::Seller])?;
        Ok(page(self.query.find_by_seller(actor.user_id, req).await?, req))
    }

    async fn pending(
        &self,
        actor: &Actor,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        actor.require_any(&[RoleCode::Captain])?;
        Ok(page(self.query.find_pending(req).await?, req))
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_public(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        info!(
            "🛒 Listing shop products | page {} size {} search {:?} category {:?}",
            req.page, req.page_size, req.search, req.category_id
        );

        let started = Instant::now();
        let result = self
            .query
            .find_public(req)
            .await
            .map(|rows| page(rows, req))
            .map_err(ServiceError::from);
        self.metrics
            .complete(Method::Get, "FindPublicProducts", started, &result);

        result
    }

    async fn find_by_id(
        &self,
        actor: Option<&Actor>,
        id: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔍 Fetching product ID {id}");

        let started = Instant::now();
        let result = self.load(actor, id).await;
        self.metrics
            .complete(Method::Get, "FindProductById", started, &result);

        result
    }

    async fn find_by_seller(
        &self,
        actor: &Actor,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        info!("📦 Listing products of seller ID {}", actor.user_id);

        let started = Instant::now();
        let result = self.own(actor, req).await;
        self.metrics
            .complete(Method::Get, "FindSellerProducts", started, &result);

        result
    }

    async fn find_pending(
        &self,
        actor: &Actor,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        info!("⏳ Listing products awaiting review | page {}", req.page);

        let started = Instant::now();
        let result = self.pending(actor, req).await;
        self.metrics
            .complete(Method::Get, "FindPendingProducts", started, &result);

        result
    }
}
