use crate::middleware::{jwt::auth_middleware, validate::SimpleValidatedQuery};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, put},
};
use shared::{
    abstract_trait::{DynNotificationCommandService, DynNotificationQueryService},
    domain::{
        Actor,
        requests::FindAllNotifications,
        responses::{
            ApiResponse, ApiResponsePagination, NotificationResponse, UnreadCountResponse,
        },
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notification",
    security(("bearer_auth" = [])),
    params(FindAllNotifications),
    responses(
        (status = 200, description = "The caller's notifications, newest first", body = ApiResponsePagination<Vec<NotificationResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_notifications(
    Extension(service): Extension<DynNotificationQueryService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedQuery(params): SimpleValidatedQuery<FindAllNotifications>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&actor, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    tag = "Notification",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread notifications", body = ApiResponse<UnreadCountResponse>)
    )
)]
pub async fn get_unread_count(
    Extension(service): Extension<DynNotificationQueryService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.unread_count(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    tag = "Notification",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked as read", body = ApiResponse<NotificationResponse>),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    Extension(service): Extension<DynNotificationCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.mark_read(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    tag = "Notification",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Number of notifications marked as read", body = serde_json::Value)
    )
)]
pub async fn mark_all_read(
    Extension(service): Extension<DynNotificationCommandService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.mark_all_read(&actor).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    tag = "Notification",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification deleted", body = serde_json::Value),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn delete_notification(
    Extension(service): Extension<DynNotificationCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_notification(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn notification_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let notifications = &app_state.di_container.notification_service;

    OpenApiRouter::new()
        .route("/api/notifications", get(get_notifications))
        .route("/api/notifications/unread-count", get(get_unread_count))
        .route("/api/notifications/read-all", put(mark_all_read))
        .route("/api/notifications/{id}/read", put(mark_read))
        .route("/api/notifications/{id}", delete(delete_notification))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(notifications.query.clone()))
        .layer(Extension(notifications.command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
