//! HTTP client for a locally running Ollama instance.
//!
//! [`OllamaClient`] wraps the Ollama REST API (completion requests, model
//! listing, availability probe) using [`reqwest`]. Generation failures are
//! surfaced to the caller; model listing fails soft to a static fallback
//! list, tagged so operators can tell degraded from healthy.

mod catalog;
mod client;

pub use catalog::{ModelCatalog, FALLBACK_MODELS};
pub use client::{OllamaClient, OllamaError};
