//! Live upstream health probe.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"error"`.
    pub status: &'static str,
    /// Upstream connectivity: `"connected"` or `"disconnected"`.
    pub ollama: &'static str,
    /// Probe failure message, present only when disconnected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /api/health
///
/// Probes the upstream live (not from the discovery snapshot) so the status
/// display reflects the instance as of this request. Probe failure is
/// reported with 503 but is non-fatal to everything else.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.ollama.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                ollama: "connected",
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "error",
                ollama: "disconnected",
                error: Some(e.to_string()),
            }),
        ),
    }
}
