use crate::{
    domain::{
        Actor, RfqStatus,
        requests::{CreateRfqRequest, NewRfq, UpdateRfqRequest, UpdateRfqStatusRequest},
        responses::{ApiResponse, RfqResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Rfq as RfqModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynRfqCommandRepository = Arc<dyn RfqCommandRepositoryTrait + Send + Sync>;
pub type DynRfqCommandService = Arc<dyn RfqCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait RfqCommandRepositoryTrait {
    async fn create_rfq(&self, req: &NewRfq) -> Result<RfqModel, RepositoryError>;
    /// Rewrites the buyer-editable fields; `product_id` and `buyer_id` are left alone.
    async fn update_rfq(
        &self,
        id: i32,
        req: &NewRfq,
        status: RfqStatus,
    ) -> Result<RfqModel, RepositoryError>;
    /// Sets the status; response fields are only overwritten when present in `req`.
    async fn update_status(
        &self,
        id: i32,
        req: &UpdateRfqStatusRequest,
    ) -> Result<RfqModel, RepositoryError>;
    async fn delete_rfq(&self, id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait RfqCommandServiceTrait {
    async fn create_rfq(
        &self,
        actor: &Actor,
        req: &CreateRfqRequest,
    ) -> Result<ApiResponse<RfqResponse>, ServiceError>;
    async fn update_rfq(
        &self,
        actor: &Actor,
        id: i32,
        req: &UpdateRfqRequest,
    ) -> Result<ApiResponse<RfqResponse>, ServiceError>;
    async fn update_status(
        &self,
        actor: &Actor,
        id: i32,
        req: &UpdateRfqStatusRequest,
    ) -> Result<ApiResponse<RfqResponse>, ServiceError>;
    async fn delete_rfq(&self, actor: &Actor, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
