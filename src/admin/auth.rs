//! Shared-secret authentication for the site-management API.
//!
//! Accepts `Authorization: Bearer <key>` or `X-API-Key: <key>`.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::error::error_response;
use crate::http::server::AppState;

pub const X_API_KEY: &str = "x-api-key";

pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.api_key.as_deref().filter(|k| !k.is_empty()) else {
        tracing::error!("API key not configured; rejecting management request");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error");
    };

    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));
    let provided = bearer.or_else(|| {
        request
            .headers()
            .get(X_API_KEY)
            .and_then(|h| h.to_str().ok())
    });

    match provided {
        None => error_response(StatusCode::UNAUTHORIZED, "Missing API key"),
        Some(key) if key == expected => next.run(request).await,
        Some(_) => {
            tracing::warn!(path = %request.uri().path(), "Rejected management request with invalid API key");
            error_response(StatusCode::FORBIDDEN, "Invalid API key")
        }
    }
}
