use crate::{
    abstract_trait::{
        DynCategoryRepository, DynNotificationCommandRepository, DynProductCommandRepository,
        DynProductQueryRepository, ProductCommandServiceTrait,
    },
    domain::{
        Actor, ProductStatus, RoleCode,
        requests::{
            CreateNotificationRequest, CreateProductRequest, NewProduct, ProductDecision,
            ReviewProductRequest, UpdateProductRequest,
        },
        responses::{ApiResponse, ProductResponse},
    },
    errors::ServiceError,
    model::Product as ProductModel,
    service::notify,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

pub struct ProductCommandService {
    product_query: DynProductQueryRepository,
    product_command: DynProductCommandRepository,
    category: DynCategoryRepository,
    notification: DynNotificationCommandRepository,
    metrics: Metrics,
}

pub struct ProductCommandServiceDeps {
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub category: DynCategoryRepository,
    pub notification: DynNotificationCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl ProductCommandService {
    pub async fn new(deps: ProductCommandServiceDeps) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *deps.registry.lock().await, "product_command_service");

        Self {
            product_query: deps.product_query,
            product_command: deps.product_command,
            category: deps.category,
            notification: deps.notification,
            metrics,
        }
    }

    async fn ensure_category(&self, category_id: Option<i32>) -> Result<(), ServiceError> {
        let Some(id) = category_id else {
            return Ok(());
        };

        match self.category.find_by_id(id).await? {
            Some(category) if category.is_active => Ok(()),
            _ => Err(ServiceError::validation(format!(
                "Category with id {id} does not exist"
            ))),
        }
    }

    /// Soft-deleted products read as missing.
    async fn active_product(&self, id: i32) -> Result<ProductModel, ServiceError> {
        self.product_query
            .find_by_id(id)
            .await?
            .filter(|product| product.is_active)
            .ok_or_else(|| ServiceError::NotFound(format!("Product with id {id} not found")))
    }

    async fn submit(
        &self,
        actor: &Actor,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        actor.require_any(&[RoleCode::Seller])?;
        self.ensure_category(req.category_id).await?;

        let product = self
            .product_command
            .create_product(&NewProduct::from_request(actor.user_id, req))
            .await?;

        Ok(ApiResponse::ok(
            "Product submitted for review",
            ProductResponse::from(product),
        ))
    }

    async fn replace(
        &self,
        actor: &Actor,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let current = self.active_product(id).await?;
        if current.seller_id != actor.user_id {
            return Err(ServiceError::Forbidden(
                "Only the owning seller can edit this product".into(),
            ));
        }

        self.ensure_category(req.category_id).await?;

        let product = self
            .product_command
            .update_product(id, &NewProduct::from_request(current.seller_id, req))
            .await?;

        Ok(ApiResponse::ok(
            "Product updated and resubmitted for review",
            ProductResponse::from(product),
        ))
    }

    async fn retire(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let current = self.active_product(id).await?;
        if current.seller_id != actor.user_id && !actor.is_admin() {
            return Err(ServiceError::Forbidden(
                "Only the owning seller or an admin can delete this product".into(),
            ));
        }

        let product = self.product_command.deactivate_product(id).await?;

        Ok(ApiResponse::ok(
            "Product deleted successfully",
            ProductResponse::from(product),
        ))
    }

    async fn review(
        &self,
        actor: &Actor,
        id: i32,
        req: &ReviewProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        actor.require_any(&[RoleCode::Captain])?;

        let reason = req
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
            .map(str::to_string);

        let (status, reason) = match req.decision {
            ProductDecision::Approve => (ProductStatus::Approved, None),
            ProductDecision::Reject => match reason {
                Some(reason) => (ProductStatus::Rejected, Some(reason)),
                None => {
                    return Err(ServiceError::validation(
                        "A reason is required when rejecting a product",
                    ));
                }
            },
        };

        self.active_product(id).await?;
        let product = self
            .product_command
            .review_product(id, status, reason.clone())
            .await?;

        let message = match &reason {
            Some(reason) => format!("Your product '{}' was rejected: {reason}", product.name),
            None => format!("Your product '{}' is now live in the shop.", product.name),
        };

        notify(
            &self.notification,
            CreateNotificationRequest::new(product.seller_id, format!("Product {status}"), message)
                .related_to("product", product.product_id),
        )
        .await;

        Ok(ApiResponse::ok(
            format!("Product {status}"),
            ProductResponse::from(product),
        ))
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        actor: &Actor,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🏗️ Seller ID {} creating product '{}'", actor.user_id, req.name);

        let started = Instant::now();
        let result = self.submit(actor, req).await;
        self.metrics
            .complete(Method::Post, "CreateProduct", started, &result);

        result
    }

    async fn update_product(
        &self,
        actor: &Actor,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔄 Updating product ID {id}");

        let started = Instant::now();
        let result = self.replace(actor, id, req).await;
        self.metrics
            .complete(Method::Put, "UpdateProduct", started, &result);

        result
    }

    async fn delete_product(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🗑️ Deleting product ID {id}");

        let started = Instant::now();
        let result = self.retire(actor, id).await;
        self.metrics
            .complete(Method::Delete, "DeleteProduct", started, &result);

        result
    }

    async fn review_product(
        &self,
        actor: &Actor,
        id: i32,
        req: &ReviewProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!(
            "🧭 User ID {} reviewing product ID {id}: {:?}",
            actor.user_id, req.decision
        );

        let started = Instant::now();
        let result = self.review(actor, id, req).await;
        self.metrics
            .complete(Method::Put, "ReviewProduct", started, &result);

        result
    }
}
