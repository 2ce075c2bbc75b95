//! Error types for the boreas-pattern crate.

/// Error type for all fallible operations in the boreas-pattern crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// Returned when formatting references a key that is not in the bindings.
    #[error("missing key '{key}' in bindings")]
    MissingKey {
        /// The placeholder name that was not bound.
        key: String,
    },

    /// Returned when a `{` placeholder is never closed.
    #[error("unclosed placeholder in pattern '{pattern}'")]
    UnclosedBrace {
        /// The offending pattern.
        pattern: String,
    },

    /// Returned when a placeholder is empty (`{}`).
    #[error("empty placeholder in pattern '{pattern}'")]
    EmptyKey {
        /// The offending pattern.
        pattern: String,
    },

    /// Returned when a placeholder name contains invalid characters.
    #[error("invalid placeholder name '{key}' (allowed: [A-Za-z0-9_])")]
    InvalidKey {
        /// The offending placeholder name.
        key: String,
    },

    /// Returned when the matcher for a template cannot be compiled.
    #[error("cannot compile pattern '{pattern}': {reason}")]
    Compile {
        /// The offending pattern.
        pattern: String,
        /// Description of the compilation failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_key() {
        let e = PatternError::MissingKey {
            key: "model".to_string(),
        };
        assert_eq!(e.to_string(), "missing key 'model' in bindings");
    }

    #[test]
    fn display_unclosed_brace() {
        let e = PatternError::UnclosedBrace {
            pattern: "{varn".to_string(),
        };
        assert_eq!(e.to_string(), "unclosed placeholder in pattern '{varn'");
    }

    #[test]
    fn display_empty_key() {
        let e = PatternError::EmptyKey {
            pattern: "{}".to_string(),
        };
        assert_eq!(e.to_string(), "empty placeholder in pattern '{}'");
    }

    #[test]
    fn display_invalid_key() {
        let e = PatternError::InvalidKey {
            key: "a-b".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid placeholder name 'a-b' (allowed: [A-Za-z0-9_])"
        );
    }

    #[test]
    fn display_compile() {
        let e = PatternError::Compile {
            pattern: "{a}".to_string(),
            reason: "too large".to_string(),
        };
        assert_eq!(e.to_string(), "cannot compile pattern '{a}': too large");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<PatternError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<PatternError>();
    }
}
