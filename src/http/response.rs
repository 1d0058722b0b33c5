//! Response building: file streaming, redirects, content types.
//!
//! # Responsibilities
//! - Map file extensions to content types (fixed table)
//! - Stream resolved files to the client
//! - Build redirect responses
//!
//! # Design Decisions
//! - Files are streamed by `tower_http::services::ServeFile` (range,
//!   conditional and HEAD handling come with it); bytes are never altered
//! - The table overrides the sender's guess only for the extensions it knows
//! - Every method is served like GET, except HEAD which stays HEAD

use std::path::Path;

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::routing::ResolvedFile;

/// Content type for a file, by extension (case-insensitive).
pub fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "html" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "eot" => "application/vnd.ms-fontobject",
        "otf" => "font/otf",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(mime)
}

/// Stream `file` in answer to `req`.
pub async fn send_file(file: &ResolvedFile, req: Request<Body>) -> Response {
    let (parts, _body) = req.into_parts();

    let mut file_req = Request::new(Body::empty());
    *file_req.method_mut() = if parts.method == Method::HEAD {
        Method::HEAD
    } else {
        Method::GET
    };
    *file_req.uri_mut() = parts.uri;
    *file_req.headers_mut() = parts.headers;

    let mut response = match ServeFile::new(&file.absolute_path).oneshot(file_req).await {
        Ok(res) => res.map(Body::new),
        Err(never) => match never {},
    };

    if response.status().is_success() {
        if let Some(mime) = file.mime_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(mime));
        }
    }
    response
}

/// 302 Found to `location`.
pub fn found(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
