//! The generation endpoint.
//!
//! `POST /api/generate` validates the topic, composes the full prompt,
//! relays it to the upstream, journals the attempt, and appends the result
//! to the history store. Only one generation may be in flight at a time; a
//! concurrent request is rejected rather than queued.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use quill_core::content::ContentType;
use quill_core::{prompt, sampling, validation};
use quill_history::NewEntry;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::journal::JournalRecord;
use crate::state::AppState;

/// Body of `POST /api/generate`.
///
/// Everything except the prompt is optional; defaults match what the UI
/// preselects. A missing prompt is treated as empty so it fails validation
/// with the same message as a blank one.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(rename = "type", default)]
    pub content_type: ContentType,
}

fn default_model() -> String {
    sampling::DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    sampling::DEFAULT_TEMPERATURE
}

/// Successful generation response.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub text: String,
    pub model: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

/// POST /api/generate
///
/// Fails with 400 before any upstream call when the topic is blank, and
/// with 409 when another generation is already in flight. On upstream
/// failure the response carries the upstream's own message; the attempt is
/// journaled only when failure journaling is enabled.
pub async fn generate(
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    validation::validate_topic(&input.prompt)?;

    // Single-flight guard: the permit is held until this handler returns.
    let _permit = state
        .generation_gate
        .clone()
        .try_acquire_owned()
        .map_err(|_| AppError::Conflict("A generation is already in flight".to_string()))?;

    let full_prompt = prompt::compose(input.content_type, &input.prompt);

    match state
        .ollama
        .generate(&full_prompt, &input.model, input.temperature)
        .await
    {
        Ok(text) => {
            state.journal.record(JournalRecord::success(
                &input.prompt,
                &text,
                input.content_type,
                &input.model,
                input.temperature,
            ));

            let entry = state.history.lock().await.add(NewEntry {
                prompt: input.prompt,
                content: text.clone(),
                content_type: input.content_type,
                model: input.model.clone(),
                temperature: input.temperature,
            });
            tracing::debug!(entry_id = %entry.id, "Generation stored in history");

            Ok(Json(GenerateResponse {
                success: true,
                text,
                model: input.model,
                content_type: input.content_type,
            }))
        }
        Err(e) => {
            if state.config.journal_failures {
                state.journal.record(JournalRecord::failure(
                    &input.prompt,
                    e.to_string(),
                    input.content_type,
                    &input.model,
                    input.temperature,
                ));
            }
            Err(AppError::Gateway(e))
        }
    }
}
