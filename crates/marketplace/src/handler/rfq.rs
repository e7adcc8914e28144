use crate::middleware::{
    jwt::auth_middleware,
    validate::{SimpleValidatedJson, SimpleValidatedQuery},
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use shared::{
    abstract_trait::{DynRfqCommandService, DynRfqQueryService},
    domain::{
        Actor,
        requests::{CreateRfqRequest, FindAllRfqs, UpdateRfqRequest, UpdateRfqStatusRequest},
        responses::{ApiResponse, ApiResponsePagination, RfqResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/rfqs",
    tag = "Rfq",
    security(("bearer_auth" = [])),
    request_body = CreateRfqRequest,
    responses(
        (status = 201, description = "RFQ submitted", body = ApiResponse<RfqResponse>),
        (status = 400, description = "Validation error or product not approved"),
        (status = 403, description = "Buyers only"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn create_rfq(
    Extension(service): Extension<DynRfqCommandService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateRfqRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_rfq(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/buyer/rfqs",
    tag = "Rfq",
    security(("bearer_auth" = [])),
    params(FindAllRfqs),
    responses(
        (status = 200, description = "The buyer's RFQs", body = ApiResponsePagination<Vec<RfqResponse>>),
        (status = 403, description = "Buyers only")
    )
)]
pub async fn get_buyer_rfqs(
    Extension(service): Extension<DynRfqQueryService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllRfqs>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_for_buyer(&actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/seller/rfqs",
    tag = "Rfq",
    security(("bearer_auth" = [])),
    params(FindAllRfqs),
    responses(
        (status = 200, description = "RFQs on the seller's products", body = ApiResponsePagination<Vec<RfqResponse>>),
        (status = 403, description = "Sellers only")
    )
)]
pub async fn get_seller_rfqs(
    Extension(service): Extension<DynRfqQueryService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllRfqs>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_for_seller(&actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/captain/rfqs",
    tag = "Rfq",
    security(("bearer_auth" = [])),
    params(FindAllRfqs),
    responses(
        (status = 200, description = "Every RFQ", body = ApiResponsePagination<Vec<RfqResponse>>),
        (status = 403, description = "Captain or admin only")
    )
)]
pub async fn get_all_rfqs(
    Extension(service): Extension<DynRfqQueryService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllRfqs>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/rfqs/{id}",
    tag = "Rfq",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "RFQ ID")),
    responses(
        (status = 200, description = "RFQ details", body = ApiResponse<RfqResponse>),
        (status = 403, description = "Not a party to this RFQ"),
        (status = 404, description = "RFQ not found")
    )
)]
pub async fn get_rfq(
    Extension(service): Extension<DynRfqQueryService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/rfqs/{id}",
    tag = "Rfq",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "RFQ ID")),
    request_body = UpdateRfqRequest,
    responses(
        (status = 200, description = "RFQ updated", body = ApiResponse<RfqResponse>),
        (status = 403, description = "Only the buyer who raised it"),
        (status = 409, description = "RFQ is already finished")
    )
)]
pub async fn update_rfq(
    Extension(service): Extension<DynRfqCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateRfqRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_rfq(&actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/rfqs/{id}/status",
    tag = "Rfq",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "RFQ ID")),
    request_body = UpdateRfqStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<RfqResponse>),
        (status = 400, description = "Missing response or DOQ fields"),
        (status = 403, description = "Not a party to this RFQ"),
        (status = 409, description = "Invalid status transition")
    )
)]
pub async fn update_rfq_status(
    Extension(service): Extension<DynRfqCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateRfqStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_status(&actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/rfqs/{id}",
    tag = "Rfq",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "RFQ ID")),
    responses(
        (status = 200, description = "RFQ deleted", body = serde_json::Value),
        (status = 403, description = "Only the buyer who raised it"),
        (status = 409, description = "Only open RFQs can be deleted")
    )
)]
pub async fn delete_rfq(
    Extension(service): Extension<DynRfqCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_rfq(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn rfq_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let rfqs = &app_state.di_container.rfq_service;

    OpenApiRouter::new()
        .route("/api/rfqs", post(create_rfq))
        .route(
            "/api/rfqs/{id}",
            get(get_rfq).put(update_rfq).delete(delete_rfq),
        )
        .route("/api/rfqs/{id}/status", put(update_rfq_status))
        .route("/api/buyer/rfqs", get(get_buyer_rfqs))
        .route("/api/seller/rfqs", get(get_seller_rfqs))
        .route("/api/captain/rfqs", get(get_all_rfqs))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(rfqs.query.clone()))
        .layer(Extension(rfqs.command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
