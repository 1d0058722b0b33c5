//! Error taxonomy for virtual-host and file resolution.
//!
//! # Design Decisions
//! - One enum for the whole resolution pipeline, so every stage can use `?`
//! - HTTP mapping lives here, next to the variants it maps
//! - `NotFound` is a pass-through signal for the static stage; it only
//!   becomes a response when nothing downstream handles the request

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure outcomes of resolving `(hostname, path)` to content.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No site directory or `config.json` for the hostname.
    #[error("no site configured for host {0}")]
    TenantNotFound(String),

    /// The site's `config.json` could not be read or parsed.
    #[error("invalid configuration for host {host}: {reason}")]
    TenantConfigInvalid { host: String, reason: String },

    /// The path targets a protected file or escapes the content root.
    #[error("forbidden path {0}")]
    Forbidden(String),

    /// No candidate file matched.
    #[error("no file matched {0}")]
    NotFound(String),

    /// Unexpected filesystem failure (anything but "does not exist").
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResolveError {
    pub fn status(&self) -> StatusCode {
        match self {
            ResolveError::TenantNotFound(_) | ResolveError::NotFound(_) => StatusCode::NOT_FOUND,
            ResolveError::Forbidden(_) => StatusCode::FORBIDDEN,
            ResolveError::TenantConfigInvalid { .. } | ResolveError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the `{"error": ...}` body. Internal details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ResolveError::TenantNotFound(_) => "Site not configured on this node",
            ResolveError::TenantConfigInvalid { .. } => "Invalid site configuration",
            ResolveError::Forbidden(_) => "Forbidden",
            ResolveError::NotFound(_) => "Not found",
            ResolveError::Io(_) => "Internal server error",
        }
    }

    /// Short label used for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            ResolveError::TenantNotFound(_) => "tenant_not_found",
            ResolveError::TenantConfigInvalid { .. } => "tenant_config_invalid",
            ResolveError::Forbidden(_) => "forbidden",
            ResolveError::NotFound(_) => "not_found",
            ResolveError::Io(_) => "io_error",
        }
    }
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.public_message())
    }
}

/// Build a `{"error": message}` JSON response.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ResolveError::TenantNotFound("a.com".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ResolveError::TenantConfigInvalid {
                host: "a.com".into(),
                reason: "eof".into()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ResolveError::Forbidden("/.htaccess".into()).status(),
            StatusCode::FORBIDDEN
        );
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(
            ResolveError::from(denied).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_message_hides_details() {
        let err = ResolveError::TenantConfigInvalid {
            host: "a.com".into(),
            reason: "expected value at line 1".into(),
        };
        assert_eq!(err.public_message(), "Invalid site configuration");
    }
}
