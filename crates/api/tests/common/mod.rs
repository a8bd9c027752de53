#![allow(dead_code)]

//! Shared test harness: builds the production router (same middleware
//! stack as `main.rs`) on top of a per-test database pool and a
//! throwaway local storage directory.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use rifugio_api::config::ServerConfig;
use rifugio_api::router::build_app_router;
use rifugio_api::state::{AppState, DocumentKindTable};
use rifugio_storage::StorageConfig;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool and a fresh local storage directory.
pub async fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let base_path = tempfile::tempdir()
        .expect("create temp storage dir")
        .keep()
        .to_string_lossy()
        .into_owned();
    let storage = rifugio_storage::connect(&StorageConfig::Local { base_path })
        .await
        .expect("local storage");

    let document_kinds = DocumentKindTable::load(&pool)
        .await
        .expect("load document kinds");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
        document_kinds: Arc::new(document_kinds),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body, None).await
}

/// POST with an `x-operator` header, for lifecycle operations that record
/// the acting user.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    operator: &str,
) -> Response {
    send_json(app, Method::POST, uri, body, Some(operator)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PATCH, uri, body, None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, body, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    operator: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(operator) = operator {
        builder = builder.header("x-operator", operator);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect the raw response body bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Assert the standard error envelope: `{ "error": ..., "code": ... }`.
pub async fn assert_error(response: Response, status: StatusCode, code: &str) -> serde_json::Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error envelope: {json}");
    assert!(json["error"].is_string());
    json
}
