#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use farmers_api::{app_router, AppConfig, AppState, CredentialList, MemoryRecordStore, RecordStore, StoreBackend};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryRecordStore>,
    _static_dir: TempDir,
}

/// Router over a fresh in-memory store, the built-in credentials, and a temp dir of pages.
pub fn test_app() -> TestApp {
    let static_dir = tempfile::tempdir().unwrap();
    for (name, body) in [
        ("login.html", "<h1>login page</h1>"),
        ("farmer.html", "<h1>farmer page</h1>"),
        ("manage.html", "<h1>manage page</h1>"),
        ("next.html", "<h1>next page</h1>"),
        ("style.css", "body { margin: 0 }"),
    ] {
        std::fs::write(static_dir.path().join(name), body).unwrap();
    }
    let config = AppConfig {
        static_dir: static_dir.path().to_path_buf(),
        store_backend: StoreBackend::Memory,
        ..AppConfig::default()
    };
    let store = Arc::new(MemoryRecordStore::new());
    let state = AppState::new(store.clone() as Arc<dyn RecordStore>, CredentialList::default());
    TestApp {
        router: app_router(state, &config),
        store,
        _static_dir: static_dir,
    }
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send_raw(app: &TestApp, req: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let resp = app.router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn send(app: &TestApp, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send_raw(app, req).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap()
    };
    (status, value)
}
