//! Site-management API tests: authentication and CRUD against a temp sites root.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use vhost_server::HttpServer;

mod common;
use common::{body_json, body_string, get, Sites, API_KEY, EXAMPLE_CONFIG};

fn api(method: Method, path: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(path)
        .header("Host", "admin.local")
        .header(header::AUTHORIZATION, format!("Bearer {}", API_KEY));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn test_auth_rules() {
    let sites = Sites::new();
    let app = HttpServer::new(sites.config()).app();

    let res = app.clone().oneshot(get("admin.local", "/site/list")).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(res).await, json!({ "error": "Missing API key" }));

    let wrong = Request::builder()
        .uri("/site/list")
        .header(header::AUTHORIZATION, "Bearer nope")
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(wrong).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(res).await, json!({ "error": "Invalid API key" }));

    let header_key = Request::builder()
        .uri("/site/list")
        .header("X-API-Key", API_KEY)
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(header_key).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_no_configured_key_is_server_error() {
    let sites = Sites::new();
    let mut config = sites.config();
    config.admin.api_key = None;
    let app = HttpServer::new(config).app();

    let res = app.oneshot(api(Method::GET, "/site/list", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(res).await, json!({ "error": "Server configuration error" }));
}

#[tokio::test]
async fn test_admin_disabled_leaves_site_path_to_tenants() {
    let sites = Sites::new();
    let mut config = sites.config();
    config.admin.enabled = false;
    let app = HttpServer::new(config).app();

    let res = app.oneshot(api(Method::GET, "/site/list", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(res).await,
        json!({ "error": "Site not configured on this node" })
    );
}

#[tokio::test]
async fn test_create_site_then_serve_it() {
    let sites = Sites::new();
    let app = HttpServer::new(sites.config()).app();

    let body = json!({
        "domain": "New-Site.com",
        "config": { "siteName": "New Site", "defaultLanguage": "de" }
    });
    let res = app
        .clone()
        .oneshot(api(Method::POST, "/site/create", Some(body)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = body_json(res).await;
    assert_eq!(created["message"], "Site created successfully");
    assert_eq!(created["id"], "new-site.com");

    let res = app.clone().oneshot(get("new-site.com", "/")).await.unwrap();
    assert_eq!(res.headers()[header::LOCATION], "/de/");

    let res = app.oneshot(get("new-site.com", "/de/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_string(res).await.contains("Welcome to New Site"));
}

#[tokio::test]
async fn test_create_validation() {
    let sites = Sites::new();
    sites.site("taken.com", EXAMPLE_CONFIG);
    let app = HttpServer::new(sites.config()).app();

    let cases = [
        (json!({ "config": {} }), StatusCode::BAD_REQUEST, "Domain is required"),
        (json!({ "domain": "a.com" }), StatusCode::BAD_REQUEST, "Config is required"),
        (
            json!({ "domain": "a.com", "config": [1] }),
            StatusCode::BAD_REQUEST,
            "Config is required",
        ),
        (
            json!({ "domain": "bad domain!", "config": { "defaultLanguage": "en" } }),
            StatusCode::BAD_REQUEST,
            "Invalid domain format",
        ),
        (
            json!({ "domain": "taken.com", "config": { "defaultLanguage": "en" } }),
            StatusCode::CONFLICT,
            "Site already exists",
        ),
    ];

    for (body, status, message) in cases {
        let res = app
            .clone()
            .oneshot(api(Method::POST, "/site/create", Some(body.clone())))
            .await
            .unwrap();
        assert_eq!(res.status(), status, "{}", body);
        assert_eq!(body_json(res).await["error"], message);
    }

    let res = app
        .oneshot(api(
            Method::POST,
            "/site/create",
            Some(json!({ "domain": "nolang.com", "config": { "siteName": "x" } })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(!sites.root().join("nolang.com").exists());
}

#[tokio::test]
async fn test_list_and_get_config() {
    let sites = Sites::new();
    sites.site("example.com", EXAMPLE_CONFIG);
    std::fs::create_dir_all(sites.root().join("empty.com")).unwrap();
    let app = HttpServer::new(sites.config()).app();

    let res = app.clone().oneshot(api(Method::GET, "/site/list", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        body_json(res).await,
        json!({ "sites": [
            { "id": "empty.com", "siteName": "empty.com", "defaultLanguage": "unknown", "hasConfig": false, "hasPublicDir": false },
            { "id": "example.com", "siteName": "Example", "defaultLanguage": "en", "hasConfig": true, "hasPublicDir": true },
        ]})
    );

    let res = app
        .clone()
        .oneshot(api(Method::GET, "/site/config/example.com", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["id"], "example.com");
    assert_eq!(body["config"]["campaigns"]["de"]["campaignId"], "100");

    let res = app
        .clone()
        .oneshot(api(Method::GET, "/site/config/empty.com", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["error"], "Site configuration not found");

    let res = app
        .oneshot(api(Method::GET, "/site/config/ghost.com", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["error"], "Site not found");
}

#[tokio::test]
async fn test_update_merges_and_applies() {
    let sites = Sites::new();
    sites.site("example.com", EXAMPLE_CONFIG);
    let app = HttpServer::new(sites.config()).app();

    let body = json!({ "domain": "example.com", "config": { "defaultLanguage": "de" } });
    let res = app
        .clone()
        .oneshot(api(Method::PUT, "/site/update", Some(body)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated = body_json(res).await;
    assert_eq!(updated["message"], "Site updated successfully");
    assert_eq!(updated["config"]["defaultLanguage"], "de");
    assert_eq!(updated["config"]["siteName"], "Example");

    let res = app.clone().oneshot(get("example.com", "/")).await.unwrap();
    assert_eq!(res.headers()[header::LOCATION], "/de/");

    let body = json!({ "domain": "ghost.com", "config": {} });
    let res = app
        .oneshot(api(Method::PUT, "/site/update", Some(body)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
