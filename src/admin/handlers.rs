use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::error_response;
use crate::http::server::AppState;
use crate::tenant::{SiteError, SiteSummary};

#[derive(Serialize)]
pub struct SiteList {
    pub sites: Vec<SiteSummary>,
}

pub async fn list_sites(State(state): State<AppState>) -> Response {
    match state.registry.list_sites().await {
        Ok(sites) => Json(SiteList { sites }).into_response(),
        Err(e) => site_error(e, "Failed to list sites"),
    }
}

pub async fn get_site_config(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
) -> Response {
    match state.registry.read_site(&site_id).await {
        Ok(record) => Json(json!({
            "id": record.id,
            "config": record.config,
            "path": record.path.display().to_string(),
        }))
        .into_response(),
        Err(e) => site_error(e, "Failed to get site configuration"),
    }
}

pub async fn create_site(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let (domain, config) = match domain_and_config(&body) {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    match state.registry.create_site(domain, config.clone()).await {
        Ok((id, path)) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Site created successfully",
                "id": id,
                "path": path.display().to_string(),
            })),
        )
            .into_response(),
        Err(e) => site_error(e, "Failed to create site"),
    }
}

pub async fn update_site(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let (domain, config) = match domain_and_config(&body) {
        Ok(parts) => parts,
        Err(response) => return response,
    };
    let Value::Object(patch) = config.clone() else {
        return error_response(StatusCode::BAD_REQUEST, "Config is required");
    };

    match state.registry.update_site(domain, patch).await {
        Ok(merged) => Json(json!({
            "message": "Site updated successfully",
            "id": domain,
            "config": merged,
        }))
        .into_response(),
        Err(e) => site_error(e, "Failed to update site"),
    }
}

/// Pull `domain` (non-empty string) and `config` (object) out of a request body.
fn domain_and_config(body: &Value) -> Result<(&str, &Value), Response> {
    let domain = match body.get("domain").and_then(Value::as_str) {
        Some(d) if !d.is_empty() => d,
        _ => return Err(error_response(StatusCode::BAD_REQUEST, "Domain is required")),
    };
    match body.get("config") {
        Some(config @ Value::Object(_)) => Ok((domain, config)),
        _ => Err(error_response(StatusCode::BAD_REQUEST, "Config is required")),
    }
}

fn site_error(err: SiteError, fallback: &'static str) -> Response {
    let status = match &err {
        SiteError::NotFound | SiteError::ConfigNotFound => StatusCode::NOT_FOUND,
        SiteError::AlreadyExists => StatusCode::CONFLICT,
        SiteError::InvalidDomain | SiteError::InvalidConfig(_) => StatusCode::BAD_REQUEST,
        SiteError::Io(_) | SiteError::Json(_) => {
            tracing::error!(error = %err, "{}", fallback);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, fallback);
        }
    };
    error_response(status, &err.to_string())
}
