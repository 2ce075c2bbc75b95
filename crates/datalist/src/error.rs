//! Error types for the boreas-datalist crate.

/// Error type for all fallible operations in the boreas-datalist crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataListError {
    /// Returned when an alignment expected at most one partner but found
    /// several.
    #[error("metadata '{metadata}' matched {count} partners, expected at most one")]
    AmbiguousMatch {
        /// Formatted key=value pairs of the element being aligned.
        metadata: String,
        /// How many partners matched.
        count: usize,
    },

    /// Returned when an alignment key is absent from a member's metadata.
    #[error("metadata key '{key}' missing from '{metadata}'")]
    MissingMetadataKey {
        /// The alignment key that was not found.
        key: String,
        /// Formatted key=value pairs of the offending member.
        metadata: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_ambiguous_match() {
        let e = DataListError::AmbiguousMatch {
            metadata: "model=MIROC6, exp=ssp585".to_string(),
            count: 2,
        };
        assert_eq!(
            e.to_string(),
            "metadata 'model=MIROC6, exp=ssp585' matched 2 partners, expected at most one"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DataListError>();
    }
}
