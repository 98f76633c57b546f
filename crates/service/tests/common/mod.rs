//! Shared test utilities for directory API integration tests
#![allow(dead_code)]

use axum::body::Body;
use axum::Router;
use http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use ::common::crypto::{unix_now, CanonicalRequest, SecretKey, SIGNATURE_HEADER, TIME_HEADER};
use service::{Config, ServiceState};

/// A fresh router over an empty in-memory directory.
pub fn app() -> Router {
    service::http::router(ServiceState::from_config(&Config::default()))
}

/// Drive one request through the router, decoding the JSON body (Null for
/// empty bodies).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// Unsigned JSON PUT (registration is the only mutation that allows it).
pub async fn put_json(app: &Router, path: &str, body: &Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method(Method::PUT)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
    )
    .await
}

/// A request carrying a canonical signature declared at `timestamp`.
pub async fn signed_at(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<&Value>,
    key: &SecretKey,
    timestamp: i64,
) -> (StatusCode, Value) {
    let raw = body
        .map(|b| serde_json::to_vec(b).unwrap())
        .unwrap_or_default();
    let canonical = CanonicalRequest {
        method: method.as_str(),
        path: path.trim_start_matches('/'),
        body: &raw,
        timestamp,
    };
    let signature = canonical.sign(key);

    send(
        app,
        Request::builder()
            .method(method)
            .uri(path)
            .header(SIGNATURE_HEADER, signature)
            .header(TIME_HEADER, timestamp.to_string())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw))
            .unwrap(),
    )
    .await
}

/// A request signed against the current clock.
pub async fn signed(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<&Value>,
    key: &SecretKey,
) -> (StatusCode, Value) {
    signed_at(app, method, path, body, key, unix_now()).await
}

/// Register a fresh identity and hand back its signing key.
pub async fn register(app: &Router, name: &str) -> SecretKey {
    let key = SecretKey::generate();
    let (status, _) = put_json(
        app,
        &format!("/users/{}", name),
        &json!({
            "name": name,
            "public_key": {"ed25519": key.public().to_base64()},
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    key
}

/// Create a network in `owner`'s namespace, signed with their key.
pub async fn create_network(app: &Router, owner: &str, name: &str, key: &SecretKey) {
    let (status, _) = signed(
        app,
        Method::PUT,
        &format!("/networks/{}/{}", owner, name),
        Some(&json!({"owner": owner, "name": name})),
        key,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}
