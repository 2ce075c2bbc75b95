//! Anomalies of a series with respect to a reference period.

use boreas_datalist::{format_metadata, Metadata};
use tracing::warn;

use crate::error::WarmingError;
use crate::series::Series;

/// How the anomaly is computed from the reference statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyMethod {
    /// `x - mean`.
    Absolute,
    /// `(x - mean) / mean * 100`, in percent.
    Relative,
    /// `(x - mean) / std`.
    Norm,
    /// The series unchanged; only the reference period check is applied.
    NoAnom,
}

/// Options for [`calc_anomaly`].
#[derive(Debug, Clone, Copy)]
pub struct AnomalyOptions {
    skipna: bool,
    check_bounds: bool,
}

impl Default for AnomalyOptions {
    fn default() -> Self {
        Self {
            skipna: false,
            check_bounds: true,
        }
    }
}

impl AnomalyOptions {
    /// Creates the default options: NaNs propagate, bounds are checked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips NaN samples when computing the reference statistics.
    pub fn with_skipna(mut self, skipna: bool) -> Self {
        self.skipna = skipna;
        self
    }

    /// Disables the check that the series spans the reference period.
    pub fn with_check_bounds(mut self, check_bounds: bool) -> Self {
        self.check_bounds = check_bounds;
        self
    }
}

/// Computes the anomaly of `series` relative to the period
/// `start..=end`.
///
/// If the series does not span the full reference period the simulation
/// cannot be referenced consistently with the others; `Ok(None)` is
/// returned and a warning (tagged with `metadata`, if given) is logged so
/// batch processing can skip the member and continue. Disable this check
/// with [`AnomalyOptions::with_check_bounds`].
///
/// # Errors
///
/// Returns [`WarmingError::IncompatibleTimeAxis`] or
/// [`WarmingError::MissingTimeAxis`] for a series with an unusable time
/// axis.
pub fn calc_anomaly(
    series: &Series,
    start: i32,
    end: i32,
    method: AnomalyMethod,
    opts: &AnomalyOptions,
    metadata: Option<&Metadata>,
) -> Result<Option<Series>, WarmingError> {
    let span = series.year_range()?;

    if opts.check_bounds {
        let in_range = match span {
            Some((min, max)) => start >= min && end <= max,
            None => false,
        };
        if !in_range {
            let meta = metadata.map(format_metadata).unwrap_or_default();
            warn!(
                start,
                end,
                metadata = %meta,
                "series does not span the reference period, skipping"
            );
            return Ok(None);
        }
    }

    if matches!(method, AnomalyMethod::NoAnom) {
        return Ok(Some(series.clone()));
    }

    let reference = series.select_years(start, end)?;
    let mean = if opts.skipna {
        boreas_stats::nanmean(reference.values())
    } else {
        boreas_stats::mean(reference.values())
    };

    let anomalies = match method {
        AnomalyMethod::Absolute => series.map_values(|v| v - mean),
        AnomalyMethod::Relative => series.map_values(|v| (v - mean) / mean * 100.0),
        AnomalyMethod::Norm => {
            let std = if opts.skipna {
                boreas_stats::nansd(reference.values())
            } else {
                boreas_stats::sd(reference.values())
            };
            series.map_values(|v| (v - mean) / std)
        }
        // Handled above; kept for exhaustiveness.
        AnomalyMethod::NoAnom => series.clone(),
    };
    Ok(Some(anomalies))
}
