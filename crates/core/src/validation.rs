//! Request validation helpers.

use crate::error::CoreError;

/// Validate the user-supplied topic before any upstream call is made.
///
/// The topic must contain at least one non-whitespace character.
pub fn validate_topic(topic: &str) -> Result<(), CoreError> {
    if topic.trim().is_empty() {
        return Err(CoreError::Validation("Prompt is required".to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_empty_topic() {
        assert!(validate_topic("a robot learns to paint").is_ok());
    }

    #[test]
    fn rejects_empty_topic() {
        assert!(validate_topic("").is_err());
    }

    #[test]
    fn rejects_whitespace_only_topic() {
        assert!(validate_topic("   \t\n").is_err());
    }

    #[test]
    fn leading_and_trailing_whitespace_is_fine() {
        assert!(validate_topic("  padded  ").is_ok());
    }
}
