mod auth;
mod category;
mod dashboard;
mod notification;
mod product;
mod rfq;
mod role;
mod user;

use anyhow::Result;
use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::{state::AppState, utils::shutdown_signal};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::auth::auth_routes;
pub use self::category::category_routes;
pub use self::dashboard::dashboard_routes;
pub use self::notification::notification_routes;
pub use self::product::product_routes;
pub use self::rfq::rfq_routes;
pub use self::role::roles_routes;
pub use self::user::user_routes;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::health_checker_handler,
        auth::register_user_handler,
        auth::login_user_handler,
        auth::get_me_handler,
        auth::change_password_handler,
        auth::forgot_password_handler,
        auth::reset_password_handler,

        user::get_users,
        user::get_user,
        user::block_user,
        user::unblock_user,
        user::verify_user,
        user::update_profile,
        user::create_staff,
        user::get_staff,

        role::get_active_roles,
        role::create_role,
        role::update_role,
        role::deactivate_role,
        role::assign_role,
        role::remove_role,

        category::get_categories,
        category::create_category,

        product::get_products,
        product::get_product,
        product::get_seller_products,
        product::get_pending_products,
        product::create_product,
        product::update_product,
        product::delete_product,
        product::review_product,

        rfq::create_rfq,
        rfq::get_buyer_rfqs,
        rfq::get_seller_rfqs,
        rfq::get_all_rfqs,
        rfq::get_rfq,
        rfq::update_rfq,
        rfq::update_rfq_status,
        rfq::delete_rfq,

        notification::get_notifications,
        notification::get_unread_count,
        notification::mark_read,
        notification::mark_all_read,
        notification::delete_notification,

        dashboard::buyer_dashboard,
        dashboard::seller_dashboard,
        dashboard::captain_dashboard,
        dashboard::admin_dashboard,
        dashboard::hr_dashboard,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and password recovery"),
        (name = "User", description = "Account administration and staff management"),
        (name = "Role", description = "Role catalogue and assignments"),
        (name = "Category", description = "Product categories"),
        (name = "Product", description = "Shop listings and product review"),
        (name = "Rfq", description = "Requests for quotation"),
        (name = "Notification", description = "In-app notifications"),
        (name = "Dashboard", description = "Per-role summaries"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}"),
        );
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => AllowOrigin::exact(origin),
        Some(Err(e)) => {
            warn!("⚠️ Ignoring invalid CORS_ORIGIN: {e}");
            AllowOrigin::any()
        }
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState, cors_origin: Option<&str>) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(auth_routes(shared_state.clone()))
            .merge(user_routes(shared_state.clone()))
            .merge(roles_routes(shared_state.clone()))
            .merge(category_routes(shared_state.clone()))
            .merge(product_routes(shared_state.clone()))
            .merge(rfq_routes(shared_state.clone()))
            .merge(notification_routes(shared_state.clone()))
            .merge(dashboard_routes(shared_state));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
            .layer(cors_layer(cors_origin))
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(port: u16, app_state: AppState, cors_origin: Option<&str>) -> Result<()> {
        let app = Self::build(app_state, cors_origin);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
