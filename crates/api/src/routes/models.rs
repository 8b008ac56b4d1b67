//! Model listing, served from the discovery snapshot.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Response of `GET /api/models`. Always 200.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    /// Selectable model identifiers.
    pub models: Vec<String>,
    /// `"live"` when fetched from the upstream, `"fallback"` when degraded.
    pub source: &'static str,
}

/// GET /api/models
///
/// Serves the most recent discovery snapshot. When the upstream listing has
/// failed the static fallback catalog is returned instead of an error, with
/// `source` tagging the degradation.
pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let catalog = state.catalog.read().await;

    Json(ModelsResponse {
        models: catalog.models().to_vec(),
        source: catalog.source(),
    })
}
