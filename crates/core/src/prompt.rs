//! Instruction templates and prompt composition.
//!
//! Each [`ContentType`] maps to a fixed instruction template. Composition is
//! deterministic string concatenation; the caller's topic text is embedded
//! verbatim with no escaping or truncation.

use crate::content::ContentType;

// ---------------------------------------------------------------------------
// Instruction templates
// ---------------------------------------------------------------------------

/// Template for short stories and story openings.
pub const STORY_TEMPLATE: &str = "You are a creative storyteller. Write an engaging short story or story beginning based on the given topic. Be creative and descriptive.";

/// Template for blog introductions.
pub const BLOG_TEMPLATE: &str = "You are a professional blog writer. Write an engaging blog introduction that hooks the reader and introduces the topic effectively. Keep it concise and compelling.";

/// Template for tweet-length posts.
pub const TWEET_TEMPLATE: &str = "You are a social media expert. Write a catchy, engaging tweet that is under 280 characters. Use relevant hashtags and make it shareable.";

/// Generic fallback template for any other content type.
pub const GENERIC_TEMPLATE: &str = "You are a helpful AI assistant. Respond to the user's request in a clear and engaging manner.";

/// Look up the instruction template for a content type.
pub fn template_for(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Story => STORY_TEMPLATE,
        ContentType::Blog => BLOG_TEMPLATE,
        ContentType::Tweet => TWEET_TEMPLATE,
        ContentType::Other => GENERIC_TEMPLATE,
    }
}

/// Build the full completion prompt for a topic.
///
/// Layout is fixed: instruction template, blank line, `Topic:` line, blank
/// line, `Response:` marker. The topic is inserted as-is.
pub fn compose(content_type: ContentType, topic: &str) -> String {
    format!(
        "{}\n\nTopic: {topic}\n\nResponse:",
        template_for(content_type)
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
