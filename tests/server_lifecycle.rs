//! Real-socket test: bind, serve a request, shut down cleanly.

use std::time::Duration;

use tokio::net::TcpListener;
use vhost_server::{HttpServer, Shutdown};

mod common;
use common::Sites;

#[tokio::test]
async fn test_serves_over_tcp_and_stops_on_shutdown() {
    let sites = Sites::new();
    sites
        .site("127.0.0.1", r#"{"siteName":"Loopback","defaultLanguage":"en"}"#)
        .file("127.0.0.1", "index.html", "<h1>loopback</h1>");

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(sites.config());
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    // Root redirects to /en/, which reqwest follows
    let res = reqwest::get(format!("http://{}/", addr)).await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.url().path(), "/en/");
    assert_eq!(res.headers()["content-type"], "text/html");
    assert_eq!(res.text().await.unwrap(), "<h1>loopback</h1>");

    let res = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["site"], "Loopback");

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
