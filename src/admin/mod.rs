//! Site-management API, mounted under `/site`.
//!
//! Not behind the vhost gate: it manages sites, it does not serve them.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState, max_body_size: usize) -> Router {
    Router::new()
        .route("/list", get(list_sites))
        .route("/config/{site_id}", get(get_site_config))
        .route("/create", post(create_site))
        .route("/update", put(update_site))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .with_state(state)
}
