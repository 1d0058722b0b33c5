//! Per-site health endpoint and the terminal 404.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Json,
};
use serde::Serialize;

use crate::error::error_response;
use crate::routing::RequestRoute;
use crate::tenant::TenantContext;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub site: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub message: &'static str,
    pub timestamp: String,
}

/// `GET /health`, answered for whichever site the Host header selects.
pub async fn health(req: Request<Body>) -> Json<HealthStatus> {
    let site = req
        .extensions()
        .get::<TenantContext>()
        .map(|ctx| ctx.config.display_name().to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let language = req
        .extensions()
        .get::<RequestRoute>()
        .map(|route| route.locale.clone());

    Json(HealthStatus {
        status: "ok",
        site,
        language,
        message: "Headless Core is running",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Reached when no file and no route matched.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}
