use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Client address as reported by the reverse proxy: the first hop of
/// `X-Forwarded-For`, else `X-Real-IP`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub Option<String>);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
        };

        let forwarded = header("x-forwarded-for")
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|hop| !hop.is_empty());

        let ip = forwarded
            .or_else(|| header("x-real-ip").map(str::trim).filter(|ip| !ip.is_empty()))
            .map(str::to_string);

        Ok(ClientIp(ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn client_ip(builder: axum::http::request::Builder) -> Option<String> {
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        ClientIp::from_request_parts(&mut parts, &()).await.unwrap().0
    }

    #[tokio::test]
    async fn takes_first_forwarded_hop() {
        let ip = client_ip(
            Request::builder()
                .header("x-forwarded-for", "203.0.113.9, 10.0.0.2")
                .header("x-real-ip", "10.0.0.2"),
        )
        .await;
        assert_eq!(ip.as_deref(), Some("203.0.113.9"));
    }

    #[tokio::test]
    async fn falls_back_to_real_ip() {
        let ip = client_ip(Request::builder().header("x-real-ip", "198.51.100.4")).await;
        assert_eq!(ip.as_deref(), Some("198.51.100.4"));

        assert_eq!(client_ip(Request::builder()).await, None);
    }
}
