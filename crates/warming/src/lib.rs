//! Anomaly computation and global warming level detection.
//!
//! The workflow this crate supports: load annual global mean temperature
//! series per simulation, reference them against a base period with
//! [`calc_anomaly`], find the first 20-year period exceeding a warming
//! level with [`calc_year_of_warming_level`], and evaluate some other
//! climate index over exactly that period with [`at_warming_level`].
//!
//! Simulations that cannot participate (reference period not covered,
//! warming level never reached, no aligned index data) are skipped, not
//! failed; errors are reserved for inconsistent inputs.

mod anomaly;
mod at_level;
mod error;
mod level;
mod series;

pub use anomaly::{calc_anomaly, AnomalyMethod, AnomalyOptions};
pub use at_level::{
    at_warming_level, at_warming_level_series, at_warming_levels_dict, at_warming_levels_list,
    AtLevelOptions, Reduce,
};
pub use error::WarmingError;
pub use level::{calc_year_of_warming_level, WarmingPeriod};
pub use series::Series;
