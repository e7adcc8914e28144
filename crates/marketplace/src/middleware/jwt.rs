use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::DynJwtService,
    domain::Actor,
    errors::{ErrorResponse, ServiceError},
};

fn bearer_token(cookie_jar: &CookieJar, req: &Request<Body>) -> Option<String> {
    cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        })
}

fn unauthorized(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(message)))
}

/// Rejects the request unless it carries a valid access token; the caller is
/// stored as an [`Actor`] extension.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let token = bearer_token(&cookie_jar, &req)
        .ok_or_else(|| unauthorized("You are not logged in, please provide token"))?;

    let claims = jwt.verify_token(&token).map_err(|err| match err {
        ServiceError::TokenExpired => unauthorized("Token has expired"),
        _ => unauthorized("Invalid token"),
    })?;

    req.extensions_mut()
        .insert(Actor::new(claims.user_id, claims.role));

    Ok(next.run(req).await)
}

/// Like [`auth_middleware`] but lets anonymous callers through. Stores an
/// `Option<Actor>`; a bad token is treated as no token.
pub async fn optional_auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> impl IntoResponse {
    let actor = bearer_token(&cookie_jar, &req)
        .and_then(|token| jwt.verify_token(&token).ok())
        .map(|claims| Actor::new(claims.user_id, claims.role));

    req.extensions_mut().insert(actor);

    next.run(req).await
}
