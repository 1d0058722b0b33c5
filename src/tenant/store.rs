//! Site directory management: list, read, create and update sites.
//!
//! Used by the admin API only. Serving never writes.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::tenant::model::TenantConfig;
use crate::tenant::registry::{is_absent, is_site_id, TenantRegistry, CONFIG_FILE, PUBLIC_DIR};

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Site not found")]
    NotFound,

    #[error("Site configuration not found")]
    ConfigNotFound,

    #[error("Site already exists")]
    AlreadyExists,

    #[error("Invalid domain format")]
    InvalidDomain,

    #[error("Invalid site configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row of the site listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteSummary {
    pub id: String,
    pub site_name: String,
    pub default_language: String,
    pub has_config: bool,
    pub has_public_dir: bool,
}

/// A site's raw configuration document.
#[derive(Debug, Clone, Serialize)]
pub struct SiteRecord {
    pub id: String,
    pub config: Value,
    pub path: PathBuf,
}

impl TenantRegistry {
    /// List every site directory. A missing sites root lists as empty.
    pub async fn list_sites(&self) -> Result<Vec<SiteSummary>, SiteError> {
        let mut entries = match tokio::fs::read_dir(self.sites_root()).await {
            Ok(entries) => entries,
            Err(e) if is_absent(&e) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut sites = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let id = entry.file_name().to_string_lossy().into_owned();
            let config = read_config_value(&entry.path().join(CONFIG_FILE)).await;
            let has_public_dir = tokio::fs::metadata(entry.path().join(PUBLIC_DIR))
                .await
                .is_ok();

            let field = |key: &str| {
                config
                    .as_ref()
                    .and_then(|c| c.get(key))
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            };

            sites.push(SiteSummary {
                site_name: field("siteName").unwrap_or_else(|| id.clone()),
                default_language: field("defaultLanguage").unwrap_or_else(|| "unknown".to_string()),
                has_config: config.is_some(),
                has_public_dir,
                id,
            });
        }

        sites.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(sites)
    }

    /// Read a site's `config.json` as stored.
    pub async fn read_site(&self, id: &str) -> Result<SiteRecord, SiteError> {
        if !is_site_id(id) {
            return Err(SiteError::NotFound);
        }
        let site_dir = self.site_dir(id);
        if !exists(&site_dir).await? {
            return Err(SiteError::NotFound);
        }
        let raw = match tokio::fs::read_to_string(site_dir.join(CONFIG_FILE)).await {
            Ok(raw) => raw,
            Err(e) if is_absent(&e) => return Err(SiteError::ConfigNotFound),
            Err(e) => return Err(e.into()),
        };

        Ok(SiteRecord {
            id: id.to_string(),
            config: serde_json::from_str(&raw)?,
            path: site_dir,
        })
    }

    /// Create `<root>/<domain>/` with its config, `public/` and a placeholder index page.
    ///
    /// Returns the normalized (lowercased) site id and its directory. A
    /// failure after the directory is claimed removes it again.
    pub async fn create_site(&self, domain: &str, config: Value) -> Result<(String, PathBuf), SiteError> {
        let id = normalize_domain(domain)?;
        let parsed = validate_document(&config)?;

        tokio::fs::create_dir_all(self.sites_root()).await?;
        let site_dir = self.site_dir(&id);
        // create_dir fails if the directory exists, so two creates cannot both win
        match tokio::fs::create_dir(&site_dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Err(SiteError::AlreadyExists),
            Err(e) => return Err(e.into()),
        }

        let populated = populate_site(&site_dir, &id, &config, &parsed).await;
        discard_on_error(&site_dir, populated).await?;

        tracing::info!(site = %id, path = ?site_dir, "Created site");
        Ok((id, site_dir))
    }

    /// Shallow-merge `patch` over the stored config and write the result.
    pub async fn update_site(&self, id: &str, patch: Map<String, Value>) -> Result<Value, SiteError> {
        if !is_site_id(id) {
            return Err(SiteError::NotFound);
        }
        let site_dir = self.site_dir(id);
        if !exists(&site_dir).await? {
            return Err(SiteError::NotFound);
        }

        let config_path = site_dir.join(CONFIG_FILE);
        let mut merged = match tokio::fs::read_to_string(&config_path).await {
            Ok(raw) => match serde_json::from_str::<Value>(&raw)? {
                Value::Object(map) => map,
                _ => Map::new(),
            },
            Err(e) if is_absent(&e) => Map::new(),
            Err(e) => return Err(e.into()),
        };
        merged.extend(patch);

        let merged = Value::Object(merged);
        validate_document(&merged)?;
        write_atomic(&config_path, &to_pretty_json(&merged)?).await?;

        tracing::info!(site = %id, "Updated site");
        Ok(merged)
    }
}

/// Lowercase and check a domain; only `[a-z0-9.-]` is allowed.
pub fn normalize_domain(domain: &str) -> Result<String, SiteError> {
    let lowered = domain.to_lowercase();
    let valid = lowered
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-');
    if !valid || lowered.starts_with('.') || !is_site_id(&lowered) {
        return Err(SiteError::InvalidDomain);
    }
    Ok(lowered)
}

fn validate_document(config: &Value) -> Result<TenantConfig, SiteError> {
    TenantConfig::parse(&config.to_string()).map_err(SiteError::InvalidConfig)
}

async fn populate_site(
    site_dir: &Path,
    id: &str,
    config: &Value,
    parsed: &TenantConfig,
) -> Result<(), SiteError> {
    let public_dir = site_dir.join(PUBLIC_DIR);
    tokio::fs::create_dir(&public_dir).await?;
    tokio::fs::write(public_dir.join("index.html"), placeholder_page(id, parsed)).await?;
    write_atomic(&site_dir.join(CONFIG_FILE), &to_pretty_json(config)?).await?;
    Ok(())
}

/// Remove a half-built site directory when `result` is an error.
async fn discard_on_error<T>(site_dir: &Path, result: Result<T, SiteError>) -> Result<T, SiteError> {
    if let Err(e) = &result {
        tracing::error!(path = ?site_dir, error = %e, "Site creation failed, removing partial directory");
        if let Err(cleanup) = tokio::fs::remove_dir_all(site_dir).await {
            tracing::error!(path = ?site_dir, error = %cleanup, "Failed to remove partial site directory");
        }
    }
    result
}

/// Replace `path` in one step: write a sibling temp file, then rename it over.
///
/// Readers see either the old document or the new one, never a partial write.
async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), SiteError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!("{}.tmp-{}", file_name, Uuid::new_v4()));

    tokio::fs::write(&tmp, contents).await?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

async fn exists(path: &Path) -> Result<bool, SiteError> {
    match tokio::fs::metadata(path).await {
        Ok(_) => Ok(true),
        Err(e) if is_absent(&e) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

async fn read_config_value(path: &Path) -> Option<Value> {
    let raw = tokio::fs::read_to_string(path).await.ok()?;
    serde_json::from_str(&raw).ok()
}

/// Four-space indented JSON.
fn to_pretty_json(value: &Value) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

fn placeholder_page(id: &str, config: &TenantConfig) -> String {
    let name = escape_html(config.site_name.as_deref().unwrap_or(id));
    let lang = escape_html(&config.default_language);
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{name}</title>
</head>
<body>
    <h1>Welcome to {name}</h1>
    <p>Site is configured and ready.</p>
</body>
</html>"#
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
