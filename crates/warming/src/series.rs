//! Time series with an annual or dated coordinate axis.

use chrono::{Datelike, NaiveDate};

use crate::error::WarmingError;

/// A one-dimensional series of values with an optional integer year axis
/// and an optional calendar date axis.
///
/// Data loaded from model output may come with either coordinate; a series
/// with both is rejected by the computations in this crate, a series with
/// neither cannot be selected by year at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    values: Vec<f64>,
    years: Option<Vec<i32>>,
    dates: Option<Vec<NaiveDate>>,
}

impl Series {
    /// Creates an annual series over consecutive years starting at
    /// `first_year`.
    pub fn annual(first_year: i32, values: Vec<f64>) -> Self {
        let years = (0..values.len() as i32).map(|i| first_year + i).collect();
        Self {
            values,
            years: Some(years),
            dates: None,
        }
    }

    /// Creates a series with an explicit year axis.
    ///
    /// # Errors
    ///
    /// Returns [`WarmingError::LengthMismatch`] if the axis length differs
    /// from the number of values.
    pub fn with_years(years: Vec<i32>, values: Vec<f64>) -> Result<Self, WarmingError> {
        if years.len() != values.len() {
            return Err(WarmingError::LengthMismatch {
                axis: "year",
                expected: values.len(),
                got: years.len(),
            });
        }
        Ok(Self {
            values,
            years: Some(years),
            dates: None,
        })
    }

    /// Creates a series with a calendar date axis.
    ///
    /// # Errors
    ///
    /// Returns [`WarmingError::LengthMismatch`] if the axis length differs
    /// from the number of values.
    pub fn with_dates(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, WarmingError> {
        if dates.len() != values.len() {
            return Err(WarmingError::LengthMismatch {
                axis: "date",
                expected: values.len(),
                got: dates.len(),
            });
        }
        Ok(Self {
            values,
            years: None,
            dates: Some(dates),
        })
    }

    /// Creates a series with both axes present. Only useful to exercise the
    /// axis check in downstream computations.
    pub fn with_axes(
        years: Option<Vec<i32>>,
        dates: Option<Vec<NaiveDate>>,
        values: Vec<f64>,
    ) -> Result<Self, WarmingError> {
        if let Some(years) = &years {
            if years.len() != values.len() {
                return Err(WarmingError::LengthMismatch {
                    axis: "year",
                    expected: values.len(),
                    got: years.len(),
                });
            }
        }
        if let Some(dates) = &dates {
            if dates.len() != values.len() {
                return Err(WarmingError::LengthMismatch {
                    axis: "date",
                    expected: values.len(),
                    got: dates.len(),
                });
            }
        }
        Ok(Self {
            values,
            years,
            dates,
        })
    }

    /// The data values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The explicit year axis, if any.
    pub fn years(&self) -> Option<&[i32]> {
        self.years.as_deref()
    }

    /// The calendar date axis, if any.
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        self.dates.as_deref()
    }

    /// The year of each sample, from the year axis or derived from the
    /// date axis.
    ///
    /// # Errors
    ///
    /// Returns [`WarmingError::IncompatibleTimeAxis`] if both axes are
    /// present and [`WarmingError::MissingTimeAxis`] if neither is.
    pub fn year_axis(&self) -> Result<Vec<i32>, WarmingError> {
        match (&self.years, &self.dates) {
            (Some(_), Some(_)) => Err(WarmingError::IncompatibleTimeAxis),
            (Some(years), None) => Ok(years.clone()),
            (None, Some(dates)) => Ok(dates.iter().map(|d| d.year()).collect()),
            (None, None) => Err(WarmingError::MissingTimeAxis),
        }
    }

    /// The minimum and maximum year, or `None` for an empty series.
    pub fn year_range(&self) -> Result<Option<(i32, i32)>, WarmingError> {
        let years = self.year_axis()?;
        let min = years.iter().min().copied();
        let max = years.iter().max().copied();
        Ok(min.zip(max))
    }

    /// Returns the samples whose year lies in `begin..=end`, with the
    /// matching slice of each axis.
    pub fn select_years(&self, begin: i32, end: i32) -> Result<Series, WarmingError> {
        let years = self.year_axis()?;
        let keep: Vec<usize> = years
            .iter()
            .enumerate()
            .filter(|(_, y)| (begin..=end).contains(*y))
            .map(|(i, _)| i)
            .collect();

        let pick_f64 = |v: &[f64]| keep.iter().map(|&i| v[i]).collect::<Vec<_>>();
        Ok(Series {
            values: pick_f64(&self.values),
            years: self
                .years
                .as_ref()
                .map(|ys| keep.iter().map(|&i| ys[i]).collect()),
            dates: self
                .dates
                .as_ref()
                .map(|ds| keep.iter().map(|&i| ds[i]).collect()),
        })
    }

    /// Replaces the values, keeping the axes. The caller must supply one
    /// value per existing sample.
    pub(crate) fn map_values(&self, f: impl Fn(f64) -> f64) -> Series {
        Series {
            values: self.values.iter().map(|&v| f(v)).collect(),
            years: self.years.clone(),
            dates: self.dates.clone(),
        }
    }
}
