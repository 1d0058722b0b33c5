//! Multi-tenant static site server library.
//!
//! One process hosts many sites. The request hostname selects the site
//! directory under the sites root; the path is resolved against that site's
//! `public/` directory with locale prefixes and try_files fallbacks.

pub mod admin;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod tenant;

pub use config::schema::ServerConfig;
pub use error::ResolveError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use tenant::{TenantConfig, TenantContext, TenantRegistry};
