//! Host resolution: request hostname → tenant.
//!
//! # Responsibilities
//! - Extract the hostname (Host header, else URI authority)
//! - Normalize it: strip port, lowercase, drop a trailing dot
//! - Look the tenant up in the registry
//!
//! # Design Decisions
//! - Exact match on the normalized name; no wildcard or alias hosts
//! - A missing Host header is treated as an unknown tenant, not a 400

use axum::http::{header, Request};

use crate::error::ResolveError;
use crate::tenant::{TenantContext, TenantRegistry};

/// Normalize a raw `Host` value. Returns `None` for an empty host.
pub fn normalize_host(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let host = if raw.starts_with('[') {
        // IPv6 literal, keep the brackets
        match raw.find(']') {
            Some(end) => &raw[..=end],
            None => raw,
        }
    } else {
        raw.split(':').next().unwrap_or(raw)
    };
    let host = host.strip_suffix('.').unwrap_or(host).to_lowercase();

    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Normalized hostname of a request.
pub fn request_host<B>(req: &Request<B>) -> Option<String> {
    req.headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| req.uri().authority().map(|a| a.as_str()))
        .and_then(normalize_host)
}

/// Resolve the tenant for a (possibly absent) normalized hostname.
pub async fn resolve_tenant(
    registry: &TenantRegistry,
    host: Option<&str>,
) -> Result<TenantContext, ResolveError> {
    match host {
        Some(host) => registry.resolve(host).await,
        None => Err(ResolveError::TenantNotFound(String::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("example.com").as_deref(), Some("example.com"));
        assert_eq!(normalize_host("EXAMPLE.COM:3000").as_deref(), Some("example.com"));
        assert_eq!(normalize_host("example.com.").as_deref(), Some("example.com"));
        assert_eq!(normalize_host("[::1]:8080").as_deref(), Some("[::1]"));
        assert_eq!(normalize_host(""), None);
        assert_eq!(normalize_host(":80"), None);
    }

    #[test]
    fn test_request_host() {
        let req1 = Request::builder()
            .header("Host", "Example.com:8080")
            .body(Body::default())
            .unwrap();
        assert_eq!(request_host(&req1).as_deref(), Some("example.com"));

        let req2 = Request::builder()
            .uri("http://other.com/path")
            .body(Body::default())
            .unwrap();
        assert_eq!(request_host(&req2).as_deref(), Some("other.com"));

        let req3 = Request::builder().uri("/path").body(Body::default()).unwrap();
        assert_eq!(request_host(&req3), None);
    }

    #[tokio::test]
    async fn test_missing_host_is_unknown_tenant() {
        let registry = TenantRegistry::new("/nonexistent");
        assert!(matches!(
            resolve_tenant(&registry, None).await,
            Err(ResolveError::TenantNotFound(_))
        ));
    }
}
