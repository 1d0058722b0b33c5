//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, timeout, security headers)
//! - Put site traffic behind the vhost gate and static stage
//! - Mount the site-management API beside it
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin::setup_admin_router;
use crate::config::ServerConfig;
use crate::http::health::{health, not_found};
use crate::http::middleware::{static_files_middleware, vhost_middleware};
use crate::http::request::MakeRequestUuidV4;
use crate::security;
use crate::tenant::TenantRegistry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TenantRegistry>,
    pub api_key: Option<Arc<str>>,
}

/// HTTP server hosting every configured site.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let registry = Arc::new(TenantRegistry::new(config.sites.resolved_root()));
        let state = AppState {
            registry,
            api_key: config.admin.api_key.as_deref().map(Arc::from),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        // Routes added after these layers are not behind the vhost gate
        let mut router = Router::new()
            .route("/health", get(health))
            .fallback(not_found)
            .layer(middleware::from_fn(static_files_middleware))
            .layer(middleware::from_fn_with_state(state.clone(), vhost_middleware));

        if config.admin.enabled {
            router = router.nest(
                "/site",
                setup_admin_router(state, config.security.max_body_size),
            );
        }

        security::headers::apply(router, &config.security)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The fully layered application, for in-process use (tests, embedding).
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            sites_root = ?self.config.sites.resolved_root(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
