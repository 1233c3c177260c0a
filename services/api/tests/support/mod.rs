//! Shared helpers for driving the router in-process

#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use axum_extra::headers::{Authorization, HeaderMapExt};
use serde_json::Value;
use tower::ServiceExt;

use exam_api::{config::AdminConfig, routes::create_router, state::AppState};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

pub fn admin() -> AdminConfig {
    AdminConfig {
        username: ADMIN_USER.to_string(),
        password: ADMIN_PASSWORD.to_string(),
    }
}

/// Router over a fresh in-memory store with the admin account seeded
pub async fn app() -> Router {
    let state = AppState::in_memory(admin());
    state.auth.seed_admin().await.unwrap();
    create_router(state)
}

/// Router with no document store behind it
pub fn offline_app() -> Router {
    create_router(AppState::offline(admin()))
}

pub fn basic_request(method: &str, uri: &str, username: &str, password: &str) -> Request<Body> {
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    request
        .headers_mut()
        .typed_insert(Authorization::basic(username, password));
    request
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send a request and decode the JSON body (`Value::Null` when empty or not JSON)
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn send_text(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}
