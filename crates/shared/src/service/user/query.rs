use crate::{
    abstract_trait::{DynRoleQueryRepository, DynUserQueryRepository, UserQueryServiceTrait},
    domain::{
        Actor, RoleCode,
        requests::FindAllUsers,
        responses::{ApiResponse, ApiResponsePagination, Pagination, UserProfileResponse},
    },
    errors::ServiceError,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::info;

pub struct UserQueryService {
    query: DynUserQueryRepository,
    role_query: DynRoleQueryRepository,
    metrics: Metrics,
}

impl UserQueryService {
    pub async fn new(
        query: DynUserQueryRepository,
        role_query: DynRoleQueryRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "user_query_service");

        Self {
            query,
            role_query,
            metrics,
        }
    }

    async fn list(
        &self,
        actor: &Actor,
        req: &FindAllUsers,
        staff_only: bool,
    ) -> Result<ApiResponsePagination<Vec<UserProfileResponse>>, ServiceError> {
        actor.require_any(&[RoleCode::Hr])?;

        let (users, total) = if staff_only {
            self.query.find_staff(req).await?
        } else {
            self.query.find_all(req).await?
        };

        let data = users.into_iter().map(UserProfileResponse::from).collect();

        Ok(ApiResponsePagination::ok(
            "Users fetched successfully",
            data,
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn load(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<UserProfileResponse>, ServiceError> {
        actor.require_any(&[RoleCode::Hr])?;

        let user = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User with id {id} not found")))?;

        let role = self
            .role_query
            .find_primary_by_user(id)
            .await?
            .and_then(|role| role.role_code.parse().ok());

        Ok(ApiResponse::ok(
            "User fetched successfully",
            UserProfileResponse::new(user, role),
        ))
    }
}

#[async_trait]
impl UserQueryServiceTrait for UserQueryService {
    async fn find_all(
        &self,
        actor: &Actor,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserProfileResponse>>, ServiceError> {
        info!(
            "🔍 Listing users | page {} size {} search {:?} role {:?}",
            req.page, req.page_size, req.search, req.role
        );

        let started = Instant::now();
        let result = self.list(actor, req, false).await;
        self.metrics.complete(Method::Get, "FindAllUsers", started, &result);

        result
    }

    async fn find_by_id(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<UserProfileResponse>, ServiceError> {
        info!("🔍 Fetching user ID {id}");

        let started = Instant::now();
        let result = self.load(actor, id).await;
        self.metrics.complete(Method::Get, "FindUserById", started, &result);

        result
    }

    async fn find_staff(
        &self,
        actor: &Actor,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserProfileResponse>>, ServiceError> {
        info!("🔍 Listing staff accounts | page {} size {}", req.page, req.page_size);

        let started = Instant::now();
        let result = self.list(actor, req, true).await;
        self.metrics.complete(Method::Get, "FindStaff", started, &result);

        result
    }
}
