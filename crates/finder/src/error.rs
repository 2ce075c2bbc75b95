//! Error types for the boreas-finder crate.

use boreas_pattern::PatternError;

/// Error type for all fallible operations in the boreas-finder crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FinderError {
    /// Wraps an error from template compilation or formatting.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Returned when a query matched nothing and `allow_empty` was not set.
    #[error("no {what} found for pattern '{pattern}'")]
    NoMatch {
        /// What was searched for ("files" or "paths").
        what: &'static str,
        /// The pattern that was searched.
        pattern: String,
    },

    /// Returned when two rows share the same attribute combination.
    ///
    /// A query that maps distinct filesystem matches to the same metadata is
    /// a configuration error; picking one silently would hide it.
    #[error("non-unique metadata: combination '{combination}' matched more than once for query '{query}'")]
    AmbiguousMetadata {
        /// The period-joined attribute combination that collided.
        combination: String,
        /// The query that produced the colliding rows.
        query: String,
    },

    /// Returned when an operation references an attribute column that does
    /// not exist in the table.
    #[error("unknown key '{key}'")]
    UnknownKey {
        /// The missing column name.
        key: String,
    },

    /// Returned when a derived column would shadow an existing one.
    #[error("column '{key}' already exists")]
    DuplicateColumn {
        /// The colliding column name.
        key: String,
    },

    /// Returned when an ensemble label does not match the grammar detected
    /// from the table's first row.
    #[error("ensemble label '{value}' at row {row} does not match grammar '{grammar}'")]
    EnsembleGrammar {
        /// The offending label.
        value: String,
        /// Row index of the offending label.
        row: usize,
        /// The grammar detected from the first row.
        grammar: &'static str,
    },

    /// Returned when a simulation is present on several grids and none of
    /// them is a known-good grid.
    #[error("simulation '{simulation}' has multiple grids, none of them valid")]
    DuplicateGrid {
        /// The period-joined simulation identifier.
        simulation: String,
    },

    /// Returned when a matched path cannot be parsed back into bindings.
    ///
    /// Indicates an ambiguous template; the finder does not disambiguate.
    #[error("matched path '{path}' does not parse against pattern '{pattern}'")]
    Unparseable {
        /// The matched filesystem path.
        path: String,
        /// The pattern it was matched by.
        pattern: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_no_match() {
        let e = FinderError::NoMatch {
            what: "files",
            pattern: "/data/{varn}/*.nc".to_string(),
        };
        assert_eq!(e.to_string(), "no files found for pattern '/data/{varn}/*.nc'");
    }

    #[test]
    fn display_ambiguous_metadata() {
        let e = FinderError::AmbiguousMetadata {
            combination: "tas.Amon.MIROC6".to_string(),
            query: "varn=tas".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "non-unique metadata: combination 'tas.Amon.MIROC6' matched more than once for query 'varn=tas'"
        );
    }

    #[test]
    fn display_unknown_key() {
        let e = FinderError::UnknownKey {
            key: "grid".to_string(),
        };
        assert_eq!(e.to_string(), "unknown key 'grid'");
    }

    #[test]
    fn display_duplicate_column() {
        let e = FinderError::DuplicateColumn {
            key: "r".to_string(),
        };
        assert_eq!(e.to_string(), "column 'r' already exists");
    }

    #[test]
    fn display_ensemble_grammar() {
        let e = FinderError::EnsembleGrammar {
            value: "r1i1p1".to_string(),
            row: 3,
            grammar: "r{r}i{i}p{p}f{f}",
        };
        assert_eq!(
            e.to_string(),
            "ensemble label 'r1i1p1' at row 3 does not match grammar 'r{r}i{i}p{p}f{f}'"
        );
    }

    #[test]
    fn display_unparseable() {
        let e = FinderError::Unparseable {
            path: "/data/x".to_string(),
            pattern: "/data/{a}{b}".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "matched path '/data/x' does not parse against pattern '/data/{a}{b}'"
        );
    }

    #[test]
    fn from_pattern_error() {
        let e: FinderError = PatternError::MissingKey {
            key: "varn".to_string(),
        }
        .into();
        assert!(matches!(e, FinderError::Pattern(_)));
        assert_eq!(e.to_string(), "missing key 'varn' in bindings");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<FinderError>();
    }
}
