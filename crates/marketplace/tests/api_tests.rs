use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use marketplace::handler::AppRouter;
use serde_json::{Value, json};
use shared::{
    domain::{ProductStatus, RoleCode},
    testing::{self, MemoryStore, RecordingMailer, TEST_PASSWORD},
};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: MemoryStore,
    mailer: RecordingMailer,
}

impl TestApp {
    async fn new() -> Self {
        let store = MemoryStore::new();
        let mailer = RecordingMailer::new();
        let state = testing::app_state(&store, &mailer).await;

        Self {
            router: AppRouter::build(state, None),
            store,
            mailer,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    async fn login(&self, identifier: &str) -> String {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "identifier": identifier, "password": TEST_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");

        body["data"]["access_token"].as_str().unwrap().to_string()
    }

    async fn seeded_login(&self, username: &str, role: RoleCode) -> (i32, String) {
        let user = self.store.seed_user(username, role).await;
        (user.user_id, self.login(username).await)
    }
}

#[tokio::test]
async fn health_docs_and_metrics_are_served() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(Method::GET, "/api/healthchecker", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, doc) = app
        .call(Method::GET, "/api-docs/openapi.json", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/rfqs/{id}/status"].is_object());

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("application/openmetrics-text"));
}

#[tokio::test]
async fn register_login_and_read_profile() {
    let app = TestApp::new().await;

    let request = Request::post("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .body(Body::from(
            json!({
                "email": "Dock.Supply@Example.com",
                "username": "docksupply",
                "password": "Quayside#77",
                "confirm_password": "Quayside#77",
                "full_name": "Dock Supply Ltd",
                "role": "seller"
            })
            .to_string(),
        ))
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["role"], "seller");
    assert!(
        body["data"]["vendor_code"]
            .as_str()
            .unwrap()
            .starts_with("SELL-")
    );

    let user_id = body["data"]["id"].as_i64().unwrap() as i32;
    let stored = app.store.user(user_id).await.unwrap();
    assert_eq!(stored.ip_address.as_deref(), Some("203.0.113.7"));

    let (status, body) = app
        .call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "identifier": "dock.supply@example.com", "password": "Quayside#77" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["expires_in"], 86400);
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let (status, me) = app
        .call(Method::GET, "/api/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["username"], "docksupply");

    let via_cookie = Request::get("/api/auth/me")
        .header(header::COOKIE, format!("token={token}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(via_cookie).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn failures_use_the_error_envelope() {
    let app = TestApp::new().await;
    app.store.seed_user("harbourmaster", RoleCode::Buyer).await;

    let (status, body) = app.call(Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = app
        .call(Method::GET, "/api/auth/me", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .call(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "not-an-email",
                "username": "ab",
                "password": "short",
                "confirm_password": "different",
                "full_name": "X"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["username"].is_array());

    let (status, body) = app
        .call(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "harbourmaster@marsa.test",
                "username": "someone-else",
                "password": "Quayside#77",
                "confirm_password": "Quayside#77",
                "full_name": "Copy Cat"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let (status, body) = app
        .call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "identifier": "harbourmaster", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn forgot_password_does_not_reveal_accounts() {
    let app = TestApp::new().await;
    app.store.seed_user("pilot", RoleCode::Buyer).await;

    for email in ["pilot@marsa.test", "nobody@marsa.test"] {
        let (status, body) = app
            .call(
                Method::POST,
                "/api/auth/forgot-password",
                None,
                Some(json!({ "email": email })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    let sent = app.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "pilot@marsa.test");
}

#[tokio::test]
async fn roles_are_enforced_per_endpoint() {
    let app = TestApp::new().await;
    let (_, buyer) = app.seeded_login("buyer", RoleCode::Buyer).await;
    let (_, hr) = app.seeded_login("people", RoleCode::Hr).await;

    let product = json!({ "name": "Fender", "price": 120.0, "moq": 2, "quantity": 40 });
    let (status, _) = app
        .call(Method::POST, "/api/products", Some(&buyer), Some(product))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .call(Method::GET, "/api/admin/users", Some(&buyer), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .call(Method::GET, "/api/admin/users?search=buyer", Some(&hr), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total_items"], 1);

    let (status, _) = app
        .call(Method::GET, "/api/dashboard/captain", Some(&buyer), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.call(Method::GET, "/api/roles", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn product_review_and_rfq_negotiation() {
    let app = TestApp::new().await;
    let (seller_id, seller) = app.seeded_login("chandler", RoleCode::Seller).await;
    let (_, buyer) = app.seeded_login("shipowner", RoleCode::Buyer).await;
    let (_, captain) = app.seeded_login("captain", RoleCode::Captain).await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/products",
            Some(&seller),
            Some(json!({
                "name": "Marine gas oil",
                "description": "ISO 8217 DMA",
                "price": 780.5,
                "moq": 10,
                "quantity": 500
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["status"], "submitted");
    assert_eq!(body["data"]["currency"], "USD");
    let product_id = body["data"]["id"].as_i64().unwrap();

    let (_, shop) = app.call(Method::GET, "/api/products", None, None).await;
    assert_eq!(shop["pagination"]["total_items"], 0);

    let uri = format!("/api/products/{product_id}");
    let (status, _) = app.call(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.call(Method::GET, &uri, Some(&seller), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, pending) = app
        .call(Method::GET, "/api/dashboard/captain", Some(&captain), None)
        .await;
    assert_eq!(pending["data"]["pending_products"], 1);

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/captain/products/{product_id}/review"),
            Some(&captain),
            Some(json!({ "decision": "approve" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["is_verified"], true);

    let (_, shop) = app
        .call(Method::GET, "/api/products?search=gas", None, None)
        .await;
    assert_eq!(shop["pagination"]["total_items"], 1);

    let (status, body) = app
        .call(
            Method::POST,
            "/api/rfqs",
            Some(&buyer),
            Some(json!({
                "product_id": product_id,
                "title": "MGO for MV Atlas",
                "quantity": 60,
                "budget_min": 40000.0,
                "budget_max": 48000.0
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let rfq_id = body["data"]["id"].as_i64().unwrap();
    let status_uri = format!("/api/rfqs/{rfq_id}/status");

    let (status, body) = app
        .call(
            Method::PUT,
            &status_uri,
            Some(&buyer),
            Some(json!({ "status": "accepted" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid status transition")
    );

    let (status, body) = app
        .call(
            Method::PUT,
            &status_uri,
            Some(&seller),
            Some(json!({ "status": "responded", "quoted_price": 46500.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, body) = app
        .call(
            Method::PUT,
            &status_uri,
            Some(&buyer),
            Some(json!({ "status": "accepted" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "accepted");

    let (status, _) = app
        .call(Method::DELETE, &format!("/api/rfqs/{rfq_id}"), Some(&buyer), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, incoming) = app
        .call(Method::GET, "/api/seller/rfqs", Some(&seller), None)
        .await;
    assert_eq!(incoming["data"][0]["quoted_price"], 46500.0);

    // product approved, RFQ received, RFQ accepted
    let (_, unread) = app
        .call(
            Method::GET,
            "/api/notifications/unread-count",
            Some(&seller),
            None,
        )
        .await;
    assert_eq!(unread["data"]["unread"], 3);
    assert_eq!(app.store.notifications_for(seller_id).await.len(), 3);

    let (status, body) = app
        .call(
            Method::PUT,
            "/api/notifications/read-all",
            Some(&seller),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], 3);
}

#[tokio::test]
async fn rfqs_need_an_approved_product() {
    let app = TestApp::new().await;
    let (seller_id, _) = app.seeded_login("chandler", RoleCode::Seller).await;
    let (_, buyer) = app.seeded_login("shipowner", RoleCode::Buyer).await;
    let draft = app
        .store
        .seed_product(seller_id, "Lube oil", ProductStatus::Submitted)
        .await;

    let rfq = |product_id: i32| {
        json!({ "product_id": product_id, "title": "Lubes", "quantity": 4 })
    };

    let (status, _) = app
        .call(Method::POST, "/api/rfqs", Some(&buyer), Some(rfq(draft.product_id)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call(Method::POST, "/api/rfqs", Some(&buyer), Some(rfq(424_242)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .call(
            Method::POST,
            "/api/rfqs",
            Some(&buyer),
            Some(json!({
                "product_id": draft.product_id,
                "title": "Lubes",
                "quantity": 4,
                "budget_min": 900.0,
                "budget_max": 100.0
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn listing_filters_are_validated() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(Method::GET, "/api/products?page_size=500", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["details"]["page_size"].is_array());

    let (status, body) = app
        .call(Method::GET, "/api/products?page=0", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["page"].is_array());

    let (status, body) = app
        .call(Method::GET, "/api/products?page_size=lots", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid query"));

    let (status, _) = app
        .call(Method::GET, "/api/products?page_size=100", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, buyer) = app.seeded_login("layla", RoleCode::Buyer).await;
    let (status, body) = app
        .call(
            Method::GET,
            "/api/buyer/rfqs?page_size=101",
            Some(&buyer),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["page_size"].is_array());

    let (status, _) = app
        .call(
            Method::GET,
            "/api/notifications?unread_only=true&page_size=0",
            Some(&buyer),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
