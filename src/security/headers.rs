//! Security response headers and CORS.
//!
//! # Responsibilities
//! - Add conservative security headers to every response
//! - Allow cross-origin requests (sites embed each other's assets)
//!
//! # Design Decisions
//! - Headers are only added when absent, so handlers can override them
//! - No Content-Security-Policy: site templates ship inline scripts and styles

use axum::{
    http::{header, HeaderName, HeaderValue},
    Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer};

use crate::config::SecurityConfig;

const SECURITY_HEADERS: [(HeaderName, &str); 4] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
    (header::REFERRER_POLICY, "no-referrer"),
    (header::X_DNS_PREFETCH_CONTROL, "off"),
];

/// Wrap `router` with the configured header layers.
pub fn apply(mut router: Router, config: &SecurityConfig) -> Router {
    if config.enable_headers {
        for (name, value) in SECURITY_HEADERS {
            router = router.layer(SetResponseHeaderLayer::if_not_present(
                name,
                HeaderValue::from_static(value),
            ));
        }
    }
    if config.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_headers_added() {
        let app = apply(Router::new().route("/", get(|| async { "ok" })), &SecurityConfig::default());
        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(res.headers()[header::X_FRAME_OPTIONS], "SAMEORIGIN");
    }

    #[tokio::test]
    async fn test_headers_disabled() {
        let config = SecurityConfig {
            enable_headers: false,
            enable_cors: false,
            ..SecurityConfig::default()
        };
        let app = apply(Router::new().route("/", get(|| async { "ok" })), &config);
        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(res.headers().get(header::X_CONTENT_TYPE_OPTIONS).is_none());
    }
}
