//! Per-request middleware for hosted sites.
//!
//! ```text
//! request → vhost.rs (attach TenantContext or 404/500)
//!         → static_files.rs (redirect / serve / 403, or attach RequestRoute and pass on)
//!         → /health or the 404 fallback
//! ```

pub mod static_files;
pub mod vhost;

pub use static_files::static_files_middleware;
pub use vhost::vhost_middleware;
