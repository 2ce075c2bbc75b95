//! Evaluation of a climate index at global warming levels.

use std::collections::BTreeMap;

use boreas_datalist::{
    format_metadata, select_by_metadata, DataList, DataListError, Predicate, DEFAULT_SELECT_BY,
};
use tracing::debug;

use crate::error::WarmingError;
use crate::level::calc_year_of_warming_level;
use crate::series::Series;

/// How the index values within a warming period are reduced to one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduce {
    Mean,
    Median,
    /// Sample standard deviation (N - 1).
    Std,
}

impl Reduce {
    fn apply(self, values: &[f64], skipna: bool) -> f64 {
        match (self, skipna) {
            (Reduce::Mean, false) => boreas_stats::mean(values),
            (Reduce::Mean, true) => boreas_stats::nanmean(values),
            (Reduce::Median, false) => boreas_stats::median(values),
            (Reduce::Median, true) => boreas_stats::nanmedian(values),
            (Reduce::Std, false) => boreas_stats::sd(values),
            (Reduce::Std, true) => boreas_stats::nansd(values),
        }
    }
}

/// Options for the `at_warming_level*` family.
#[derive(Debug, Clone)]
pub struct AtLevelOptions {
    select_by: Vec<String>,
    skipna: bool,
    n_years: usize,
    factor: Option<f64>,
}

impl Default for AtLevelOptions {
    fn default() -> Self {
        Self {
            select_by: DEFAULT_SELECT_BY.iter().map(|s| s.to_string()).collect(),
            skipna: false,
            n_years: 20,
            factor: None,
        }
    }
}

impl AtLevelOptions {
    /// Creates the default options: align by model, experiment, and
    /// ensemble member; 20-year windows; NaNs propagate; no scaling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the metadata keys used to align the temperature and index
    /// lists.
    pub fn with_select_by(mut self, keys: &[&str]) -> Self {
        self.select_by = keys.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Skips NaN samples in the reduction.
    pub fn with_skipna(mut self, skipna: bool) -> Self {
        self.skipna = skipna;
        self
    }

    /// Sets the warming period length in years.
    pub fn with_n_years(mut self, n_years: usize) -> Self {
        self.n_years = n_years;
        self
    }

    /// Multiplies the reduced values by a unit conversion factor.
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = Some(factor);
        self
    }
}

/// Looks up the index member aligned with `meta` and the years of the
/// warming period, shared by the reduced and unreduced variants.
fn windowed_index(
    meta: &boreas_datalist::Metadata,
    tas: &Series,
    index_list: &DataList<Series>,
    warming_level: f64,
    opts: &AtLevelOptions,
) -> Result<Option<(Series, boreas_datalist::Metadata)>, WarmingError> {
    let mut predicate = Predicate::new();
    for key in &opts.select_by {
        let value = meta
            .get(key)
            .ok_or_else(|| DataListError::MissingMetadataKey {
                key: key.clone(),
                metadata: format_metadata(meta),
            })?;
        predicate = predicate.equals(key, value);
    }

    let matches = select_by_metadata(index_list, &predicate);
    if matches.len() > 1 {
        return Err(DataListError::AmbiguousMatch {
            metadata: format_metadata(meta),
            count: matches.len(),
        }
        .into());
    }
    let Some((index, index_meta)) = matches.into_iter().next() else {
        debug!(metadata = %format_metadata(meta), "no index data, skipping");
        return Ok(None);
    };

    let Some(period) = calc_year_of_warming_level(tas, warming_level, opts.n_years)? else {
        debug!(
            warming_level,
            metadata = %format_metadata(meta),
            "warming level not reached, skipping"
        );
        return Ok(None);
    };

    let window = index.select_years(period.begin, period.end)?;
    if window.is_empty() {
        debug!(
            metadata = %format_metadata(meta),
            "index does not cover the warming period, skipping"
        );
        return Ok(None);
    }
    Ok(Some((window, index_meta)))
}

/// Computes the reduced value of a climate index at one warming level.
///
/// Each member of `tas_list` holds global mean temperature *anomalies*;
/// its warming period is located with [`calc_year_of_warming_level`], the
/// aligned member of `index_list` is sliced to those years, and the slice
/// is reduced to a single number. Members without an aligned index,
/// without a warming period, or whose index does not cover the period are
/// skipped.
///
/// # Errors
///
/// Returns [`DataListError::AmbiguousMatch`] (wrapped) if a temperature
/// member aligns with several index members, and a time axis error for
/// unusable series.
pub fn at_warming_level(
    tas_list: &DataList<Series>,
    index_list: &DataList<Series>,
    warming_level: f64,
    reduce: Reduce,
    opts: &AtLevelOptions,
) -> Result<DataList<f64>, WarmingError> {
    let mut out = Vec::new();
    for (tas, meta) in tas_list {
        let Some((window, index_meta)) =
            windowed_index(meta, tas, index_list, warming_level, opts)?
        else {
            continue;
        };
        let mut value = reduce.apply(window.values(), opts.skipna);
        if let Some(factor) = opts.factor {
            value *= factor;
        }
        out.push((value, index_meta));
    }
    Ok(out)
}

/// Like [`at_warming_level`] but keeps the yearly values of each warming
/// period instead of reducing them.
///
/// The scaling factor, if set, is applied per sample.
pub fn at_warming_level_series(
    tas_list: &DataList<Series>,
    index_list: &DataList<Series>,
    warming_level: f64,
    opts: &AtLevelOptions,
) -> Result<DataList<Series>, WarmingError> {
    let mut out = Vec::new();
    for (tas, meta) in tas_list {
        let Some((window, index_meta)) =
            windowed_index(meta, tas, index_list, warming_level, opts)?
        else {
            continue;
        };
        let window = match opts.factor {
            Some(factor) => window.map_values(|v| v * factor),
            None => window,
        };
        out.push((window, index_meta));
    }
    Ok(out)
}

/// Evaluates [`at_warming_level`] for each level, in order.
pub fn at_warming_levels_list(
    tas_list: &DataList<Series>,
    index_list: &DataList<Series>,
    warming_levels: &[f64],
    reduce: Reduce,
    opts: &AtLevelOptions,
) -> Result<Vec<DataList<f64>>, WarmingError> {
    warming_levels
        .iter()
        .map(|&level| at_warming_level(tas_list, index_list, level, reduce, opts))
        .collect()
}

/// Evaluates [`at_warming_level`] for each level, keyed by the formatted
/// level (e.g. `"1.5"`).
pub fn at_warming_levels_dict(
    tas_list: &DataList<Series>,
    index_list: &DataList<Series>,
    warming_levels: &[f64],
    reduce: Reduce,
    opts: &AtLevelOptions,
) -> Result<BTreeMap<String, DataList<f64>>, WarmingError> {
    let mut out = BTreeMap::new();
    for &level in warming_levels {
        let result = at_warming_level(tas_list, index_list, level, reduce, opts)?;
        out.insert(format!("{level:?}"), result);
    }
    Ok(out)
}
