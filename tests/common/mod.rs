//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tower::ServiceExt;

use snippetbox::config::AppConfig;
use snippetbox::http::routes;
use snippetbox::routing::SnippetId;
use snippetbox::store::{MemoryStore, Snippet, SnippetStore};

pub const HAIKU: &str = "An old silent pond...\nA frog jumps into the pond,\nsplash! Silence again.";

/// Static root with a bare directory and one that has an index document.
pub fn static_root() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir(tmp.path().join("css")).unwrap();
    std::fs::write(tmp.path().join("css/main.css"), "body { color: #333; }").unwrap();
    std::fs::create_dir(tmp.path().join("docs")).unwrap();
    std::fs::write(tmp.path().join("docs/index.html"), "<h1>Docs</h1>").unwrap();
    tmp
}

/// A store holding snippet 1 and nothing else.
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = MemoryStore::new();
    let now = SystemTime::now();
    store
        .put(Snippet {
            id: SnippetId::new(1).unwrap(),
            title: "An old silent pond".to_string(),
            content: HAIKU.to_string(),
            created: now,
            expires: now + Duration::from_secs(3600),
        })
        .unwrap();
    Arc::new(store)
}

/// The full application over a fresh static root and seeded store.
pub fn test_app() -> (TempDir, axum::Router) {
    let root = static_root();
    let mut config = AppConfig::default();
    config.server.static_dir = root.path().to_string_lossy().into_owned();
    let store: Arc<dyn SnippetStore> = seeded_store();
    (root, routes(&config, store))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn send(app: &axum::Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(app: &axum::Router, uri: &str) -> TestResponse {
    send(app, Request::builder().method(Method::GET).uri(uri).body(Body::empty()).unwrap()).await
}

pub fn assert_security_headers(headers: &HeaderMap) {
    assert_eq!(
        headers[header::CONTENT_SECURITY_POLICY],
        "default-src 'self'; style-src 'self' fonts.googleapis.com; font-src fonts.gstatic.com"
    );
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_XSS_PROTECTION], "1; mode=block");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "deny");
}

/// Serve `app` on an ephemeral local port.
pub async fn spawn_server(app: axum::Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await;
    });
    addr
}
