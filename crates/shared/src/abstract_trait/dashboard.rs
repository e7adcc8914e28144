use crate::{
    domain::{
        Actor,
        requests::RfqScope,
        responses::{
            AdminDashboard, ApiResponse, BuyerDashboard, CaptainDashboard, HrDashboard,
            SellerDashboard,
        },
    },
    errors::{RepositoryError, ServiceError},
    model::StatusTally,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynDashboardRepository = Arc<dyn DashboardRepositoryTrait + Send + Sync>;
pub type DynDashboardService = Arc<dyn DashboardServiceTrait + Send + Sync>;

#[async_trait]
pub trait DashboardRepositoryTrait {
    async fn rfq_status_counts(&self, scope: RfqScope) -> Result<Vec<StatusTally>, RepositoryError>;
    /// Active products only; `None` covers every seller.
    async fn product_status_counts(
        &self,
        seller_id: Option<i32>,
    ) -> Result<Vec<StatusTally>, RepositoryError>;
    /// Users per primary role code.
    async fn user_role_counts(&self) -> Result<Vec<StatusTally>, RepositoryError>;
    async fn count_blocked_users(&self) -> Result<i64, RepositoryError>;
    async fn count_unverified_users(&self) -> Result<i64, RepositoryError>;
}

#[async_trait]
pub trait DashboardServiceTrait {
    async fn buyer(&self, actor: &Actor) -> Result<ApiResponse<BuyerDashboard>, ServiceError>;
    async fn seller(&self, actor: &Actor) -> Result<ApiResponse<SellerDashboard>, ServiceError>;
    async fn captain(&self, actor: &Actor)
    -> Result<ApiResponse<CaptainDashboard>, ServiceError>;
    async fn admin(&self, actor: &Actor) -> Result<ApiResponse<AdminDashboard>, ServiceError>;
    async fn hr(&self, actor: &Actor) -> Result<ApiResponse<HrDashboard>, ServiceError>;
}
