//! Content-type tags for generation requests.
//!
//! The tag selects the instruction template used by
//! [`prompt::compose`](crate::prompt::compose). Unknown wire values
//! deserialize to [`ContentType::Other`] so a stale or experimental UI can
//! never produce a deserialization failure.

use serde::{Deserialize, Serialize};

/// Kind of text the caller wants generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Short story or story opening.
    #[default]
    Story,
    /// Blog post introduction.
    Blog,
    /// Tweet-length social post.
    Tweet,
    /// Anything else; gets the generic assistant template.
    #[serde(other)]
    Other,
}

impl ContentType {
    /// Wire representation of the tag (`"story"`, `"blog"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Story => "story",
            ContentType::Blog => "blog",
            ContentType::Tweet => "tweet",
            ContentType::Other => "other",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
