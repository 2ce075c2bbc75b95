//! Detection of the first period exceeding a warming level.

use boreas_stats::{centered_window_offsets, rolling_mean_centered};

use crate::error::WarmingError;
use crate::series::Series;

/// The first `n_years`-long period whose mean exceeds a warming level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmingPeriod {
    /// First year of the period.
    pub begin: i32,
    /// Last year of the period (inclusive).
    pub end: i32,
    /// Central year of the period.
    pub center: i32,
}

/// Finds the first period of `n_years` whose mean anomaly strictly
/// exceeds `warming_level`.
///
/// The anomalies are smoothed with a centered rolling mean over `n_years`;
/// windows that extend beyond the series are not considered. The period is
/// centered on the first smoothed value above the level; for an even
/// window the center year is the `n_years / 2 + 1`-th year of the period.
///
/// Returns `Ok(None)` if the level is never exceeded. This is an expected
/// outcome for low-sensitivity models under weak forcing, so it is not an
/// error.
///
/// # Errors
///
/// Returns [`WarmingError::InvalidWindow`] for `n_years < 1` and a time
/// axis error for a series without a usable year axis.
pub fn calc_year_of_warming_level(
    anomalies: &Series,
    warming_level: f64,
    n_years: usize,
) -> Result<Option<WarmingPeriod>, WarmingError> {
    if n_years < 1 {
        return Err(WarmingError::InvalidWindow {
            n_years: n_years as i64,
        });
    }

    let years = anomalies.year_axis()?;
    let smoothed = rolling_mean_centered(anomalies.values(), n_years);

    let exceeding = smoothed
        .iter()
        .position(|&v| v - warming_level > 0.0);
    let Some(idx) = exceeding else {
        return Ok(None);
    };

    let (beg_offset, end_offset) = centered_window_offsets(n_years);
    let center = years[idx];
    Ok(Some(WarmingPeriod {
        begin: center - beg_offset as i32,
        end: center + end_offset as i32,
        center,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_series_crosses_in_the_low_2020s() {
        // 0.0 for 2000-2019, 2.0 for 2020-2039. The centered 20-year mean
        // first exceeds 1.0 once the window holds 11 warm years, which
        // happens for the window centered on 2021.
        let mut values = vec![0.0; 20];
        values.extend(vec![2.0; 20]);
        let anomalies = Series::annual(2000, values);

        let period = calc_year_of_warming_level(&anomalies, 1.0, 20)
            .unwrap()
            .unwrap();
        assert_eq!(period.center, 2021);
        assert_eq!(period.begin, 2011);
        assert_eq!(period.end, 2030);
        assert_eq!(period.end - period.begin + 1, 20);
    }

    #[test]
    fn level_never_reached() {
        let anomalies = Series::annual(2000, vec![0.1; 40]);
        assert_eq!(calc_year_of_warming_level(&anomalies, 1.0, 20).unwrap(), None);
    }

    #[test]
    fn exceedance_must_be_strict() {
        let anomalies = Series::annual(2000, vec![1.0; 40]);
        assert_eq!(calc_year_of_warming_level(&anomalies, 1.0, 20).unwrap(), None);
        assert!(calc_year_of_warming_level(&anomalies, 0.99, 20)
            .unwrap()
            .is_some());
    }

    #[test]
    fn odd_window_is_symmetric() {
        let mut values = vec![0.0; 10];
        values.extend(vec![2.0; 11]);
        let anomalies = Series::annual(2000, values);

        let period = calc_year_of_warming_level(&anomalies, 1.0, 5)
            .unwrap()
            .unwrap();
        assert_eq!(period.end - period.begin + 1, 5);
        assert_eq!(period.center - period.begin, 2);
        assert_eq!(period.end - period.center, 2);
    }

    #[test]
    fn window_of_one_picks_the_first_warm_year() {
        let anomalies = Series::annual(2000, vec![0.0, 0.5, 1.5, 0.0]);
        let period = calc_year_of_warming_level(&anomalies, 1.0, 1)
            .unwrap()
            .unwrap();
        assert_eq!(period.begin, 2002);
        assert_eq!(period.end, 2002);
        assert_eq!(period.center, 2002);
    }

    #[test]
    fn zero_window_is_rejected() {
        let anomalies = Series::annual(2000, vec![0.0; 10]);
        let err = calc_year_of_warming_level(&anomalies, 1.0, 0).unwrap_err();
        assert_eq!(err, WarmingError::InvalidWindow { n_years: 0 });
    }

    #[test]
    fn incomplete_windows_are_not_considered() {
        // Warm only at the edges, where no full window fits.
        let mut values = vec![5.0; 3];
        values.extend(vec![0.0; 20]);
        values.extend(vec![5.0; 3]);
        let anomalies = Series::annual(2000, values);
        assert_eq!(calc_year_of_warming_level(&anomalies, 1.0, 21).unwrap(), None);
    }
}
