//! Route handlers for the `/api` surface.
//!
//! Route hierarchy:
//!
//! ```text
//! /api/generate         start a generation (POST)
//! /api/models           selectable model identifiers (GET, never fails)
//! /api/health           live upstream probe (GET)
//! /api/history          prior generations, newest first (GET)
//! /api/history/{id}     one prior generation (GET)
//! ```

pub mod generate;
pub mod health;
pub mod history;
pub mod models;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate::generate))
        .route("/models", get(models::list_models))
        .route("/health", get(health::health_check))
        .route("/history", get(history::list))
        .route("/history/{id}", get(history::get_by_id))
}
