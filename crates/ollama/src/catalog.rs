//! Model catalog with explicit degradation tagging.

/// Models advertised when the upstream listing is unavailable.
pub const FALLBACK_MODELS: &[&str] = &["gemma3:4b", "gemma3:1b", "gemma3:12b", "gemma3:27b"];

/// Result of a model-listing attempt.
///
/// Listing never fails outright: when the upstream is unreachable the
/// catalog degrades to [`FALLBACK_MODELS`] and records the cause, so a
/// degraded catalog is distinguishable from a healthy response that happens
/// to contain the same names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelCatalog {
    /// Names fetched live from the upstream.
    Live(Vec<String>),
    /// Static fallback served because the upstream listing failed.
    Degraded {
        /// The fallback model names.
        fallback: Vec<String>,
        /// Why the live listing failed.
        cause: String,
    },
}

impl ModelCatalog {
    /// Build the degraded catalog from [`FALLBACK_MODELS`].
    pub fn degraded(cause: impl Into<String>) -> Self {
        ModelCatalog::Degraded {
            fallback: FALLBACK_MODELS.iter().map(|m| m.to_string()).collect(),
            cause: cause.into(),
        }
    }

    /// The model names, regardless of provenance.
    pub fn models(&self) -> &[String] {
        match self {
            ModelCatalog::Live(models) => models,
            ModelCatalog::Degraded { fallback, .. } => fallback,
        }
    }

    /// Whether this catalog is the static fallback.
    pub fn is_degraded(&self) -> bool {
        matches!(self, ModelCatalog::Degraded { .. })
    }

    /// Provenance tag for status payloads: `"live"` or `"fallback"`.
    pub fn source(&self) -> &'static str {
        match self {
            ModelCatalog::Live(_) => "live",
            ModelCatalog::Degraded { .. } => "fallback",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
