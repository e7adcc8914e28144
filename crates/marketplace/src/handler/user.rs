use crate::middleware::{
    client_ip::ClientIp,
    jwt::auth_middleware,
    validate::{SimpleValidatedJson, SimpleValidatedQuery},
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use shared::{
    abstract_trait::{DynUserCommandService, DynUserQueryService},
    domain::{
        Actor,
        requests::{CreateStaffRequest, FindAllUsers, UpdateProfileRequest},
        responses::{ApiResponse, ApiResponsePagination, UserProfileResponse, UserResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "User",
    security(("bearer_auth" = [])),
    params(FindAllUsers),
    responses(
        (status = 200, description = "List of users", body = ApiResponsePagination<Vec<UserProfileResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin or HR only")
    )
)]
pub async fn get_users(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllUsers>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserProfileResponse>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/block",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User blocked", body = ApiResponse<UserResponse>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn block_user(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.block_user(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/unblock",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User unblocked", body = ApiResponse<UserResponse>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn unblock_user(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.unblock_user(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/verify",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User verified", body = ApiResponse<UserResponse>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn verify_user(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.verify_user(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "User",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn update_profile(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_profile(&actor, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/hr/staff",
    tag = "User",
    security(("bearer_auth" = [])),
    request_body = CreateStaffRequest,
    responses(
        (status = 201, description = "Staff account created", body = ApiResponse<UserProfileResponse>),
        (status = 400, description = "Only captain or hr accounts can be created here"),
        (status = 403, description = "HR or admin only"),
        (status = 409, description = "Email or username already taken")
    )
)]
pub async fn create_staff(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    ClientIp(ip_address): ClientIp,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateStaffRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_staff(&actor, &body, ip_address).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/hr/staff",
    tag = "User",
    security(("bearer_auth" = [])),
    params(FindAllUsers),
    responses(
        (status = 200, description = "Captain and HR accounts", body = ApiResponsePagination<Vec<UserProfileResponse>>),
        (status = 403, description = "HR or admin only")
    )
)]
pub async fn get_staff(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllUsers>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_staff(&actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn user_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let users = &app_state.di_container.user_service;

    OpenApiRouter::new()
        .route("/api/admin/users", get(get_users))
        .route("/api/admin/users/{id}", get(get_user))
        .route("/api/admin/users/{id}/block", put(block_user))
        .route("/api/admin/users/{id}/unblock", put(unblock_user))
        .route("/api/admin/users/{id}/verify", put(verify_user))
        .route("/api/users/me", put(update_profile))
        .route("/api/hr/staff", get(get_staff).post(create_staff))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(users.query.clone()))
        .layer(Extension(users.command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
