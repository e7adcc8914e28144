use crate::middleware::{jwt::auth_middleware, validate::SimpleValidatedJson};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use shared::{
    abstract_trait::{DynRoleCommandService, DynRoleQueryService},
    domain::{
        Actor, RoleCode,
        requests::{AssignRoleRequest, CreateRoleRequest, UpdateRoleRequest},
        responses::{ApiResponse, RoleResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "Role",
    responses(
        (status = 200, description = "Active roles", body = ApiResponse<Vec<RoleResponse>>)
    )
)]
pub async fn get_active_roles(
    Extension(service): Extension<DynRoleQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_active().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/admin/roles",
    tag = "Role",
    security(("bearer_auth" = [])),
    request_body = CreateRoleRequest,
    responses(
        (status = 201, description = "Role created", body = ApiResponse<RoleResponse>),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Role code already exists")
    )
)]
pub async fn create_role(
    Extension(service): Extension<DynRoleCommandService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateRoleRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_role(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/roles/{id}",
    tag = "Role",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Role ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<RoleResponse>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Role not found")
    )
)]
pub async fn update_role(
    Extension(service): Extension<DynRoleCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(mut body): SimpleValidatedJson<UpdateRoleRequest>,
) -> Result<impl IntoResponse, HttpError> {
    body.id = id;

    let response = service.update_role(&actor, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/admin/roles/{id}/deactivate",
    tag = "Role",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role deactivated", body = ApiResponse<RoleResponse>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn deactivate_role(
    Extension(service): Extension<DynRoleCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.deactivate_role(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/roles",
    tag = "Role",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = AssignRoleRequest,
    responses(
        (status = 200, description = "Role assigned", body = ApiResponse<RoleResponse>),
        (status = 403, description = "Not allowed to grant this role"),
        (status = 404, description = "User or role not found")
    )
)]
pub async fn assign_role(
    Extension(service): Extension<DynRoleCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<AssignRoleRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.assign_role(&actor, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}/roles/{role_code}",
    tag = "Role",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID"),
        ("role_code" = RoleCode, Path, description = "Role code")
    ),
    responses(
        (status = 200, description = "Role removed", body = serde_json::Value),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User does not hold this role")
    )
)]
pub async fn remove_role(
    Extension(service): Extension<DynRoleCommandService>,
    Extension(actor): Extension<Actor>,
    Path((id, role_code)): Path<(i32, RoleCode)>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.remove_role(&actor, id, role_code).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn roles_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let roles = &app_state.di_container.role_service;

    let admin = OpenApiRouter::new()
        .route("/api/admin/roles", post(create_role))
        .route("/api/admin/roles/{id}", put(update_role))
        .route("/api/admin/roles/{id}/deactivate", put(deactivate_role))
        .route("/api/admin/users/{id}/roles", post(assign_role))
        .route(
            "/api/admin/users/{id}/roles/{role_code}",
            delete(remove_role),
        )
        .route_layer(middleware::from_fn(auth_middleware));

    OpenApiRouter::new()
        .route("/api/roles", get(get_active_roles))
        .merge(admin)
        .layer(Extension(roles.query.clone()))
        .layer(Extension(roles.command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
