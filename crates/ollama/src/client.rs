//! REST client for the Ollama HTTP endpoints.

use quill_core::sampling;
use serde::{Deserialize, Serialize};

use crate::catalog::ModelCatalog;

/// HTTP client for a single Ollama instance.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the Ollama REST layer.
///
/// Unreachable upstream, a non-2xx status, and a malformed response body all
/// end up here; the `Display` form carries the upstream's own message so
/// callers can relay it verbatim.
#[derive(Debug, thiserror::Error)]
pub enum OllamaError {
    /// The HTTP request failed (network, DNS, or body decode).
    #[error("Ollama request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Ollama returned a non-2xx status code.
    #[error("Ollama API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Body for `POST /api/generate`. Always non-streaming.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: SamplingOptions,
}

/// Sampling parameters attached to every generation request.
///
/// Temperature is whatever the caller supplied, forwarded without clamping;
/// `top_p` and `max_tokens` are fixed.
#[derive(Debug, Serialize)]
struct SamplingOptions {
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
}

/// Body of a successful `POST /api/generate` response.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Body of a `GET /api/tags` response.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

impl OllamaClient {
    /// Create a new client for an Ollama instance.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:11434`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Base HTTP URL of the upstream instance.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a completion for `prompt` and return the generated text.
    ///
    /// Sends a single non-streaming `POST /api/generate`. The request is
    /// fired exactly once: no retries, and no timeout beyond the transport
    /// default.
    pub async fn generate(
        &self,
        prompt: &str,
        model: &str,
        temperature: f64,
    ) -> Result<String, OllamaError> {
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: SamplingOptions {
                temperature,
                top_p: sampling::TOP_P,
                max_tokens: sampling::MAX_TOKENS,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await?;

        let parsed: GenerateResponse = Self::parse_response(response).await?;
        Ok(parsed.response)
    }

    /// List the model names available on the upstream instance.
    ///
    /// Never fails: a listing error degrades to the static fallback catalog
    /// with the cause recorded, and a warning is emitted for operators.
    pub async fn list_models(&self) -> ModelCatalog {
        match self.fetch_models().await {
            Ok(models) => ModelCatalog::Live(models),
            Err(e) => {
                tracing::warn!(error = %e, "Model listing failed, serving fallback catalog");
                ModelCatalog::degraded(e.to_string())
            }
        }
    }

    /// Probe upstream availability.
    ///
    /// Issues a `GET /api/tags` and discards the body. Failure here is
    /// informational only; nothing else in the system depends on it.
    pub async fn health_check(&self) -> Result<(), OllamaError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- private helpers ----

    /// `GET /api/tags`, mapped to the plain model names.
    async fn fetch_models(&self) -> Result<Vec<String>, OllamaError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await?;

        let tags: TagsResponse = Self::parse_response(response).await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or an [`OllamaError::Api`] containing the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, OllamaError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(OllamaError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, OllamaError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), OllamaError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
