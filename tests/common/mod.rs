//! Shared fixtures for integration tests: on-disk sites and request helpers.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use axum::body::Body;
use axum::http::{Request, Response};
use serde_json::Value;
use tempfile::TempDir;
use vhost_server::ServerConfig;

pub const API_KEY: &str = "test-api-key";

pub const EXAMPLE_CONFIG: &str = r#"{
    "siteName": "Example",
    "defaultLanguage": "en",
    "crm": { "provider": "stripe" },
    "campaigns": {
        "de": { "campaignId": "100", "gatewayId": "1" },
        "be-fr": { "campaignId": "101", "gatewayId": "1", "productId": "9" }
    }
}"#;

/// A temporary sites root.
pub struct Sites {
    dir: TempDir,
}

impl Sites {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Add a site directory with `config.json` and an empty `public/`.
    pub fn site(&self, host: &str, config: &str) -> &Self {
        let dir = self.root().join(host);
        fs::create_dir_all(dir.join("public")).unwrap();
        fs::write(dir.join("config.json"), config).unwrap();
        self
    }

    /// Add a file under a site's `public/`.
    pub fn file(&self, host: &str, rel: &str, content: &str) -> &Self {
        let path = self.root().join(host).join("public").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    /// Server config pointing at this root, with the test API key.
    pub fn config(&self) -> ServerConfig {
        let mut config = ServerConfig::default();
        config.sites.root = self.root().to_path_buf();
        config.admin.api_key = Some(API_KEY.to_string());
        config
    }
}

pub fn get(host: &str, path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header("Host", host)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(res: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
