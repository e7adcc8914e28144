use crate::middleware::jwt::auth_middleware;
use axum::{
    Extension, Json, http::StatusCode, middleware, response::IntoResponse, routing::get,
};
use shared::{
    abstract_trait::DynDashboardService,
    domain::{
        Actor,
        responses::{
            AdminDashboard, ApiResponse, BuyerDashboard, CaptainDashboard, HrDashboard,
            SellerDashboard,
        },
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/dashboard/buyer",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Buyer dashboard", body = ApiResponse<BuyerDashboard>),
        (status = 403, description = "Buyers only")
    )
)]
pub async fn buyer_dashboard(
    Extension(service): Extension<DynDashboardService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.buyer(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/seller",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Seller dashboard", body = ApiResponse<SellerDashboard>),
        (status = 403, description = "Sellers only")
    )
)]
pub async fn seller_dashboard(
    Extension(service): Extension<DynDashboardService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.seller(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/captain",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Captain dashboard", body = ApiResponse<CaptainDashboard>),
        (status = 403, description = "Captains only")
    )
)]
pub async fn captain_dashboard(
    Extension(service): Extension<DynDashboardService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.captain(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin dashboard", body = ApiResponse<AdminDashboard>),
        (status = 403, description = "Admins only")
    )
)]
pub async fn admin_dashboard(
    Extension(service): Extension<DynDashboardService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.admin(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/hr",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "HR dashboard", body = ApiResponse<HrDashboard>),
        (status = 403, description = "HR only")
    )
)]
pub async fn hr_dashboard(
    Extension(service): Extension<DynDashboardService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.hr(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn dashboard_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/dashboard/buyer", get(buyer_dashboard))
        .route("/api/dashboard/seller", get(seller_dashboard))
        .route("/api/dashboard/captain", get(captain_dashboard))
        .route("/api/dashboard/admin", get(admin_dashboard))
        .route("/api/dashboard/hr", get(hr_dashboard))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.dashboard_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
