//! Hostname-keyed site lookup under the sites root.
//!
//! # Responsibilities
//! - Locate `<root>/<host>/config.json` for a hostname
//! - Parse it into a [`TenantConfig`]
//! - Hand back a [`TenantContext`] with the site's content root
//!
//! # Design Decisions
//! - Hostname is the key; lookup is one path join, independent of site count
//! - No cache: every call re-reads `config.json`, so edits apply immediately
//! - Read-only; the management API writes through [`super::store`]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ResolveError;
use crate::tenant::model::TenantConfig;

pub const CONFIG_FILE: &str = "config.json";
pub const PUBLIC_DIR: &str = "public";

/// Resolved site for a single request.
#[derive(Debug, Clone)]
pub struct TenantContext {
    /// Normalized hostname the site was found under.
    pub host: String,
    pub config: Arc<TenantConfig>,
    /// `<root>/<host>/public`
    pub content_root: PathBuf,
}

/// Reads site configuration from a fixed sites root.
#[derive(Debug, Clone)]
pub struct TenantRegistry {
    sites_root: PathBuf,
}

impl TenantRegistry {
    pub fn new(sites_root: impl Into<PathBuf>) -> Self {
        Self {
            sites_root: sites_root.into(),
        }
    }

    pub fn sites_root(&self) -> &Path {
        &self.sites_root
    }

    /// Directory of the site named `id`. Callers must check the id first.
    pub(crate) fn site_dir(&self, id: &str) -> PathBuf {
        self.sites_root.join(id)
    }

    /// Look up the site for an already-normalized hostname.
    pub async fn resolve(&self, host: &str) -> Result<TenantContext, ResolveError> {
        if !is_site_id(host) {
            return Err(ResolveError::TenantNotFound(host.to_string()));
        }

        let site_dir = self.site_dir(host);
        let config_path = site_dir.join(CONFIG_FILE);

        match tokio::fs::metadata(&site_dir).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(ResolveError::TenantNotFound(host.to_string())),
            Err(e) if is_absent(&e) => return Err(ResolveError::TenantNotFound(host.to_string())),
            Err(e) => return Err(e.into()),
        }
        match tokio::fs::metadata(&config_path).await {
            Ok(_) => {}
            Err(e) if is_absent(&e) => return Err(ResolveError::TenantNotFound(host.to_string())),
            Err(e) => return Err(e.into()),
        }

        let raw = tokio::fs::read_to_string(&config_path)
            .await
            .map_err(|e| ResolveError::TenantConfigInvalid {
                host: host.to_string(),
                reason: e.to_string(),
            })?;
        let config = TenantConfig::parse(&raw).map_err(|reason| ResolveError::TenantConfigInvalid {
            host: host.to_string(),
            reason,
        })?;

        Ok(TenantContext {
            host: host.to_string(),
            config: Arc::new(config),
            content_root: site_dir.join(PUBLIC_DIR),
        })
    }
}

/// True if `id` can name a site directory: one path component, no traversal.
pub fn is_site_id(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\', '\0'])
}

/// "Does not exist" in any of its forms.
pub(crate) fn is_absent(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory)
}
