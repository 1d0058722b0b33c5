//! Virtual host gate.
//! Every site request must resolve to a tenant before anything else runs.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ResolveError;
use crate::http::request::RequestIdExt;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::host::{request_host, resolve_tenant};

pub async fn vhost_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let host = request_host(&req);

    match resolve_tenant(&state.registry, host.as_deref()).await {
        Ok(ctx) => {
            tracing::debug!(
                request_id = %req.request_id(),
                host = %ctx.host,
                content_root = ?ctx.content_root,
                "Routed to site"
            );
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        Err(err) => {
            match &err {
                ResolveError::TenantNotFound(_) => {
                    tracing::warn!(request_id = %req.request_id(), host = ?host, "Site not found for host");
                }
                _ => {
                    tracing::error!(request_id = %req.request_id(), host = ?host, error = %err, "Site config error");
                }
            }
            metrics::record_request(err.outcome(), err.status().as_u16(), start);
            err.into_response()
        }
    }
}
