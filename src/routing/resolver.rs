//! try_files path resolution inside a tenant's content root.
//!
//! # Responsibilities
//! - Reject protected (`/.ht*`) and traversing paths before touching disk
//! - Probe `$uri`, `$uri.html`, `$uri/index.html` in that order
//! - Return the first regular file found
//!
//! # Design Decisions
//! - Candidates are built up front; probing short-circuits on first hit
//! - Every probe follows symlinks and requires a regular file
//! - "Does not exist" is a miss; any other I/O error aborts resolution

use std::path::{Path, PathBuf};

use crate::error::ResolveError;
use crate::http::response::mime_for;
use crate::tenant::registry::is_absent;

const INDEX_FILE: &str = "index.html";
const HTML_SUFFIX: &str = ".html";

/// A file chosen for serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub absolute_path: PathBuf,
    /// `None` leaves content-type detection to the file sender.
    pub mime_type: Option<&'static str>,
}

impl ResolvedFile {
    pub fn new(absolute_path: PathBuf) -> Self {
        let mime_type = mime_for(&absolute_path);
        Self {
            absolute_path,
            mime_type,
        }
    }
}

/// True for paths that reach `.htaccess`, `.htpasswd` and friends.
pub fn is_protected(path: &str) -> bool {
    path.contains("/.ht")
}

/// Ordered candidate files for `path` under `content_root`.
pub fn candidates(content_root: &Path, path: &str) -> Result<Vec<PathBuf>, ResolveError> {
    let path = if path == "/" { "/index.html" } else { path };
    if is_protected(path) {
        return Err(ResolveError::Forbidden(path.to_string()));
    }

    let mut base = content_root.to_path_buf();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(ResolveError::Forbidden(path.to_string())),
            s if s.contains(['\0', '\\']) => return Err(ResolveError::Forbidden(path.to_string())),
            s => base.push(s),
        }
    }

    let mut out = Vec::with_capacity(3);
    out.push(base.clone());
    if !path.ends_with(HTML_SUFFIX) && !path.ends_with('/') {
        let mut suffixed = base.clone().into_os_string();
        suffixed.push(HTML_SUFFIX);
        out.push(PathBuf::from(suffixed));
    }
    out.push(base.join(INDEX_FILE));
    Ok(out)
}

/// Resolve `path` to a file, or `NotFound` after the whole fallback chain.
pub async fn resolve_file(content_root: &Path, path: &str) -> Result<ResolvedFile, ResolveError> {
    for candidate in candidates(content_root, path)? {
        if let Some(found) = probe(candidate).await? {
            tracing::debug!(path = %path, file = ?found, "Resolved file");
            return Ok(ResolvedFile::new(found));
        }
    }
    Err(ResolveError::NotFound(path.to_string()))
}

async fn probe(candidate: PathBuf) -> Result<Option<PathBuf>, ResolveError> {
    match tokio::fs::metadata(&candidate).await {
        Ok(meta) if meta.is_file() => Ok(Some(candidate)),
        Ok(_) => Ok(None),
        Err(e) if is_absent(&e) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
