//! Shared harness for API integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`) over
//! the `#[sqlx::test]`-provided pool and offers small request helpers so
//! individual tests stay readable.

// Each integration test binary compiles this module separately and not all
// of them use every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use evpass_api::config::ServerConfig;
use evpass_api::context::ActiveEventContext;
use evpass_api::router::build_app_router;
use evpass_api::state::AppState;
use evpass_api::ws::WsManager;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        unregistered_tag_ttl_hours: 24,
        ledger_sweep_interval_secs: 600,
    }
}

/// Build application state over the given pool.
pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config()),
        ws_manager: Arc::new(WsManager::new()),
        active_event: Arc::new(ActiveEventContext::new()),
        event_bus: Arc::new(evpass_events::EventBus::default()),
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = test_state(pool);
    build_app_router(state, &test_config())
}

/// Build the router and also return the state, for tests that need direct
/// access to the active-event context, event bus, or WebSocket manager.
pub fn build_test_app_with_state(pool: PgPool) -> (Router, AppState) {
    let state = test_state(pool);
    let app = build_app_router(state.clone(), &test_config());
    (app, state)
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a DELETE request.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
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

/// Read a response body as parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as a UTF-8 string.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Assert status and return the plain-text body.
pub async fn expect_text(response: Response<Body>, status: StatusCode) -> String {
    assert_eq!(response.status(), status);
    body_text(response).await
}
