#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;
use somemart::config::DEFAULT_AUTH_REALM;
use somemart::{build_app, ApiMode, AppState, CatalogStore, MemoryStore};
use std::sync::Arc;
use tower::ServiceExt;

pub const BODY_LIMIT: usize = 16 * 1024;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub fn app(mode: ApiMode) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let dyn_store: Arc<dyn CatalogStore> = store.clone();
    let state = AppState::new(dyn_store, mode, DEFAULT_AUTH_REALM);
    TestApp {
        router: build_app(state, BODY_LIMIT),
        store,
    }
}

pub fn app_with_store(store: Arc<dyn CatalogStore>, mode: ApiMode) -> Router {
    build_app(AppState::new(store, mode, DEFAULT_AUTH_REALM), BODY_LIMIT)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(router: &Router, req: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(req).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    TestResponse { status, headers, body }
}

pub fn post_raw(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request")
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    post_raw(uri, body.to_string())
}

pub fn post_json_as(uri: &str, body: &Value, username: &str, password: &str) -> Request<Body> {
    let mut req = post_json(uri, body);
    let token = STANDARD.encode(format!("{}:{}", username, password));
    req.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Basic {}", token).parse().expect("header value"),
    );
    req
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
