use std::path::Path;

use anyhow::{bail, Context, Result};
use boreas_warming::{
    calc_anomaly, calc_year_of_warming_level, AnomalyMethod, AnomalyOptions, Series,
};
use serde::Deserialize;
use tracing::info;

use crate::cli::WarmingLevelArgs;
use crate::config::{self, AnomalyToml};

#[derive(Debug, Deserialize)]
struct AnnualRow {
    year: i32,
    value: f64,
}

pub fn run(args: WarmingLevelArgs) -> Result<()> {
    let defaults = match &args.config {
        Some(path) => config::load(path)?.anomaly,
        None => AnomalyToml::default(),
    };
    let (start, end) = reference_period(&args, &defaults);

    let series = read_series(&args.input)?;
    info!(samples = series.len(), "loaded temperature series");

    let anomalies = calc_anomaly(
        &series,
        start,
        end,
        AnomalyMethod::Absolute,
        &AnomalyOptions::new(),
        None,
    )?;
    let Some(anomalies) = anomalies else {
        bail!("input does not span the reference period {start}-{end}");
    };

    for &threshold in &args.thresholds {
        match calc_year_of_warming_level(&anomalies, threshold, args.n_years)? {
            Some(period) => println!(
                "{threshold}: reached in {}-{} (central year {})",
                period.begin, period.end, period.center
            ),
            None => println!("{threshold}: not reached"),
        }
    }
    Ok(())
}

/// Resolves the reference period: CLI flags win over the config file's
/// `[anomaly]` section, which falls back to 1850-1900.
fn reference_period(args: &WarmingLevelArgs, defaults: &AnomalyToml) -> (i32, i32) {
    (
        args.start.unwrap_or(defaults.start),
        args.end.unwrap_or(defaults.end),
    )
}

/// Reads an annual series from a CSV file with `year,value` rows.
fn read_series(path: &Path) -> Result<Series> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut years = Vec::new();
    let mut values = Vec::new();
    for row in reader.deserialize() {
        let row: AnnualRow = row.context("malformed CSV row")?;
        years.push(row.year);
        values.push(row.value);
    }
    if values.is_empty() {
        bail!("{} contains no data rows", path.display());
    }
    Ok(Series::with_years(years, values)?)
}
