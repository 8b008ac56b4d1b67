//! Integration tests for `GET /api/health` and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get_request, spawn_upstream, unreachable_base_url};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: reachable upstream reports connected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_connected_when_upstream_is_live() {
    let upstream = spawn_upstream(StatusCode::OK, json!({"response": "unused"})).await;
    let t = build_test_app(&upstream.base_url).await;

    let response = get_request(t.app.clone(), "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["ollama"], "connected");
    assert!(body.get("error").is_none());
}

// ---------------------------------------------------------------------------
// Test: unreachable upstream reports disconnected with 503
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_disconnected_when_upstream_is_down() {
    let t = build_test_app(&unreachable_base_url().await).await;

    let response = get_request(t.app.clone(), "/api/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["ollama"], "disconnected");
    assert!(body["error"].is_string());
}

// ---------------------------------------------------------------------------
// Test: unknown routes fall through to the (empty) static dir and 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let upstream = spawn_upstream(StatusCode::OK, json!({"response": "unused"})).await;
    let t = build_test_app(&upstream.base_url).await;

    let response = get_request(t.app.clone(), "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let upstream = spawn_upstream(StatusCode::OK, json!({"response": "unused"})).await;
    let t = build_test_app(&upstream.base_url).await;

    let response = get_request(t.app.clone(), "/api/health").await;

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}
