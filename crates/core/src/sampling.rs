//! Sampling defaults forwarded to the model server.
//!
//! `top_p` and `max_tokens` are always attached to every generation request;
//! temperature comes from the caller and is forwarded as-is, without
//! clamping to any range.

use crate::content::ContentType;

/// Model used when the request omits one.
pub const DEFAULT_MODEL: &str = "gemma3:4b";

/// Temperature used when the request omits one.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Content type used when the request omits one.
pub const DEFAULT_CONTENT_TYPE: ContentType = ContentType::Story;

/// Nucleus-sampling cutoff attached to every request.
pub const TOP_P: f64 = 0.9;

/// Completion-length cap attached to every request.
pub const MAX_TOKENS: u32 = 500;
