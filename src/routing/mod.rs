//! Request resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (host, path)
//!     → host.rs (normalize host → TenantRegistry → TenantContext)
//!     → locale.rs (root redirect, locale prefix → RequestRoute)
//!     → resolver.rs (try_files probing → ResolvedFile)
//!     → Return: Serve / Redirect / PassThrough, or a ResolveError
//! ```
//!
//! # Design Decisions
//! - Each stage takes the previous stage's output as a value; nothing is
//!   stashed on shared state
//! - Deterministic: same input and filesystem always give the same result
//! - A failed host lookup ends the request; no fallback to another site

pub mod host;
pub mod locale;
pub mod resolver;

pub use locale::RequestRoute;
pub use resolver::ResolvedFile;

use crate::error::ResolveError;
use crate::tenant::{TenantContext, TenantRegistry};

/// Outcome of routing a request inside a known tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 302 to the given location.
    Redirect(String),
    /// Serve this file.
    Serve { route: RequestRoute, file: ResolvedFile },
    /// No file matched; let the next handler try.
    PassThrough(RequestRoute),
}

/// Route `raw_path` within an already-resolved tenant.
pub async fn route_request(ctx: &TenantContext, raw_path: &str) -> Result<Resolution, ResolveError> {
    if resolver::is_protected(raw_path) {
        return Err(ResolveError::Forbidden(raw_path.to_string()));
    }
    if let Some(location) = locale::root_redirect(&ctx.config, raw_path) {
        return Ok(Resolution::Redirect(location));
    }

    let route = locale::route(&ctx.config, raw_path);
    match resolver::resolve_file(&ctx.content_root, &route.path).await {
        Ok(file) => Ok(Resolution::Serve { route, file }),
        Err(ResolveError::NotFound(_)) => Ok(Resolution::PassThrough(route)),
        Err(e) => Err(e),
    }
}

/// Full pipeline: raw `Host` value and path to a resolution.
pub async fn resolve(
    registry: &TenantRegistry,
    raw_host: &str,
    raw_path: &str,
) -> Result<(TenantContext, Resolution), ResolveError> {
    let host = host::normalize_host(raw_host);
    let ctx = host::resolve_tenant(registry, host.as_deref()).await?;
    let resolution = route_request(&ctx, raw_path).await?;
    Ok((ctx, resolution))
}
