use crate::{
    domain::{
        Actor, ProductStatus,
        requests::{CreateProductRequest, NewProduct, ReviewProductRequest, UpdateProductRequest},
        responses::{ApiResponse, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Product as ProductModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;
pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(&self, req: &NewProduct) -> Result<ProductModel, RepositoryError>;
    /// Replaces the editable fields and sends the product back to review.
    async fn update_product(
        &self,
        id: i32,
        req: &NewProduct,
    ) -> Result<ProductModel, RepositoryError>;
    async fn review_product(
        &self,
        id: i32,
        status: ProductStatus,
        rejection_reason: Option<String>,
    ) -> Result<ProductModel, RepositoryError>;
    async fn deactivate_product(&self, id: i32) -> Result<ProductModel, RepositoryError>;
}

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(
        &self,
        actor: &Actor,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_product(
        &self,
        actor: &Actor,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn delete_product(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn review_product(
        &self,
        actor: &Actor,
        id: i32,
        req: &ReviewProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
}
