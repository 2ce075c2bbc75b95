//! Error types for the boreas-warming crate.

use boreas_datalist::DataListError;

/// Error type for all fallible operations in the boreas-warming crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WarmingError {
    /// Returned when a series carries both a year axis and a date axis.
    ///
    /// Annual and dated data need different selection logic; a series with
    /// both is a caller bug, not something to guess around.
    #[error("series has both a year axis and a date axis")]
    IncompatibleTimeAxis,

    /// Returned when a series carries neither a year axis nor a date axis.
    #[error("series has neither a year axis nor a date axis")]
    MissingTimeAxis,

    /// Returned when a coordinate axis and the values differ in length.
    #[error("{axis} axis has {got} entries, expected {expected}")]
    LengthMismatch {
        /// Which axis is wrong ("year" or "date").
        axis: &'static str,
        /// The number of values in the series.
        expected: usize,
        /// The number of axis entries supplied.
        got: usize,
    },

    /// Returned for a non-positive rolling window length.
    #[error("n_years must be a positive integer, got {n_years}")]
    InvalidWindow {
        /// The rejected window length.
        n_years: i64,
    },

    /// Wraps an alignment failure from the data list layer.
    #[error(transparent)]
    DataList(#[from] DataListError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_incompatible_time_axis() {
        assert_eq!(
            WarmingError::IncompatibleTimeAxis.to_string(),
            "series has both a year axis and a date axis"
        );
    }

    #[test]
    fn display_invalid_window() {
        assert_eq!(
            WarmingError::InvalidWindow { n_years: 0 }.to_string(),
            "n_years must be a positive integer, got 0"
        );
    }

    #[test]
    fn display_length_mismatch() {
        let e = WarmingError::LengthMismatch {
            axis: "year",
            expected: 3,
            got: 2,
        };
        assert_eq!(e.to_string(), "year axis has 2 entries, expected 3");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WarmingError>();
    }
}
