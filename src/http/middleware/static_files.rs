//! Static file stage: locale routing, try_files and file sending.
//!
//! Runs after the vhost gate. Anything it cannot match is passed on with the
//! effective locale attached, so later handlers see the same routing result.

use std::time::Instant;

use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ResolveError;
use crate::http::request::RequestIdExt;
use crate::http::response::{found, send_file};
use crate::observability::metrics;
use crate::routing::{route_request, Resolution};
use crate::tenant::TenantContext;

pub async fn static_files_middleware(mut req: Request<Body>, next: Next) -> Response {
    // Not behind the vhost gate; nothing to serve from
    let Some(ctx) = req.extensions().get::<TenantContext>().cloned() else {
        return next.run(req).await;
    };

    let start = Instant::now();
    let path = req.uri().path().to_string();

    match route_request(&ctx, &path).await {
        Ok(Resolution::Redirect(location)) => {
            metrics::record_request("redirect", 302, start);
            found(&location)
        }
        Ok(Resolution::Serve { route, file }) => {
            tracing::debug!(
                request_id = %req.request_id(),
                host = %ctx.host,
                locale = %route.locale,
                file = ?file.absolute_path,
                "Serving file"
            );
            let response = send_file(&file, req).await;
            metrics::record_request("served", response.status().as_u16(), start);
            response
        }
        Ok(Resolution::PassThrough(route)) => {
            req.extensions_mut().insert(route);
            next.run(req).await
        }
        Err(err @ ResolveError::Forbidden(_)) => {
            metrics::record_request(err.outcome(), 403, start);
            err.into_response()
        }
        Err(err) => {
            tracing::error!(
                request_id = %req.request_id(),
                host = %ctx.host,
                path = %path,
                error = %err,
                "File resolution failed"
            );
            metrics::record_request(err.outcome(), err.status().as_u16(), start);
            err.into_response()
        }
    }
}
