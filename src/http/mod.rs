//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (request ID)
//!     → middleware/vhost.rs (Host → TenantContext, or 404/500)
//!     → middleware/static_files.rs (locale + try_files)
//!     → response.rs (stream file / redirect)
//!     → health.rs (health endpoint, terminal 404)
//!     → Send to client
//! ```

pub mod health;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
