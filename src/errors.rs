//! Error types for word-list preparation, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! - W001: `EmptyWord` (A word was empty after trimming)
//! - W002: `InvalidCharacter` (A word contained a non-letter character)
//!
//! # Examples
//!
//! ```
//! use runegrid::errors::WordError;
//!
//! let err = WordError::InvalidCharacter { word: "CAT5".to_string(), invalid_char: '5' };
//! assert_eq!(err.code(), "W002");
//! assert!(err.display_detailed().contains("W002"));
//! ```

/// Problems found while normalizing a caller's words.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WordError {
    #[error("Empty word")]
    EmptyWord,

    #[error("Word \"{word}\" contains invalid character '{invalid_char}' (only letters A-Z allowed)")]
    InvalidCharacter { word: String, invalid_char: char },
}

impl WordError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            WordError::EmptyWord => "W001",
            WordError::InvalidCharacter { .. } => "W002",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            WordError::EmptyWord => Some("Remove blank entries from the word list"),
            WordError::InvalidCharacter { .. } => {
                Some("Words may only contain the letters A-Z (case is ignored); drop digits, spaces and punctuation")
            }
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_help() {
        let err = WordError::EmptyWord;
        assert_eq!(err.code(), "W001");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("W001"));
        assert!(detailed.contains("blank"));
    }

    #[test]
    fn test_invalid_character_message_names_word_and_char() {
        let err = WordError::InvalidCharacter { word: "NO-GO".to_string(), invalid_char: '-' };
        let msg = err.to_string();
        assert!(msg.contains("NO-GO"));
        assert!(msg.contains("'-'"));
        assert_eq!(err.code(), "W002");
    }

    #[test]
    fn test_all_error_codes_are_unique() {
        let mut codes = std::collections::HashSet::new();
        let errors = vec![
            WordError::EmptyWord,
            WordError::InvalidCharacter { word: "A1".to_string(), invalid_char: '1' },
        ];

        for err in errors {
            let code = err.code();
            assert!(code.starts_with('W'), "Error code '{}' should start with 'W'", code);
            assert!(codes.insert(code), "Duplicate error code found: {}", code);
        }
    }

    #[test]
    fn test_format_without_help() {
        assert_eq!(format_error_with_code_and_help("boom", "X001", None), "boom (X001)");
        assert_eq!(
            format_error_with_code_and_help("boom", "X001", Some("try again")),
            "boom (X001)\ntry again"
        );
    }
}
