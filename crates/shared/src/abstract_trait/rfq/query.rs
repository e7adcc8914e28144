use crate::{
    domain::{
        Actor,
        requests::{FindAllRfqs, RfqScope},
        responses::{ApiResponse, ApiResponsePagination, RfqResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::RfqWithSeller,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynRfqQueryRepository = Arc<dyn RfqQueryRepositoryTrait + Send + Sync>;
pub type DynRfqQueryService = Arc<dyn RfqQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait RfqQueryRepositoryTrait {
    async fn find_all(
        &self,
        scope: RfqScope,
        req: &FindAllRfqs,
    ) -> Result<(Vec<RfqWithSeller>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<RfqWithSeller>, RepositoryError>;
}

#[async_trait]
pub trait RfqQueryServiceTrait {
    async fn find_for_buyer(
        &self,
        actor: &Actor,
        req: &FindAllRfqs,
    ) -> Result<ApiResponsePagination<Vec<RfqResponse>>, ServiceError>;
    async fn find_for_seller(
        &self,
        actor: &Actor,
        req: &FindAllRfqs,
    ) -> Result<ApiResponsePagination<Vec<RfqResponse>>, ServiceError>;
    async fn find_all(
        &self,
        actor: &Actor,
        req: &FindAllRfqs,
    ) -> Result<ApiResponsePagination<Vec<RfqResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<RfqResponse>, ServiceError>;
}
