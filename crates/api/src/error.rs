use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quill_core::error::CoreError;
use quill_ollama::OllamaError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps domain errors from `quill_core` and gateway errors from
/// `quill_ollama`, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `quill_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The upstream model server failed on the generation path.
    #[error("Failed to generate text: {0}")]
    Gateway(#[from] OllamaError),

    /// A requested resource does not exist.
    #[error("{entity} not found")]
    NotFound {
        /// Entity kind, e.g. `"History entry"`.
        entity: &'static str,
    },

    /// The request conflicts with in-flight work.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, json!({ "error": msg }))
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "An internal error occurred" }),
                    )
                }
            },

            // Generation failures relay the upstream's own message as
            // `details`; the request is never retried.
            AppError::Gateway(err) => {
                tracing::error!(error = %err, "Upstream generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to generate text",
                        "details": err.to_string(),
                    }),
                )
            }

            AppError::NotFound { entity } => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("{entity} not found") }),
            ),

            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal error occurred" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
