//! Read access to the generation history.
//!
//! Entries are created internally on successful generation; these routes
//! only read. "Loading" an entry into the UI copies its fields client-side
//! and never mutates the store.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use quill_history::HistoryEntry;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response of `GET /api/history`.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Prior generations, most recent first.
    pub history: Vec<HistoryEntry>,
}

/// GET /api/history
pub async fn list(State(state): State<AppState>) -> Json<HistoryResponse> {
    let store = state.history.lock().await;
    Json(HistoryResponse {
        history: store.list().to_vec(),
    })
}

/// GET /api/history/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let store = state.history.lock().await;
    let entry = store.get(id).cloned().ok_or(AppError::NotFound {
        entity: "History entry",
    })?;

    Ok(Json(entry))
}
