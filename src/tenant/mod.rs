//! Tenant (hosted site) subsystem.
//!
//! # Data Flow
//! ```text
//! hostname
//!     → registry.rs (<root>/<host>/config.json exists?)
//!     → model.rs (parse & validate TenantConfig)
//!     → TenantContext { host, config, content_root }
//!
//! Admin API:
//!     → store.rs (list / read / create / update site directories)
//! ```
//!
//! # Design Decisions
//! - The sites root is injected at construction, never read from the environment here
//! - Configs are re-read per request; there is no cross-request cache

pub mod model;
pub mod registry;
pub mod store;

pub use model::{Campaign, CrmConfig, CrmProvider, TenantConfig};
pub use registry::{TenantContext, TenantRegistry};
pub use store::{SiteError, SiteRecord, SiteSummary};
