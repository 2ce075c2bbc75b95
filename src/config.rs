use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Boreas configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoreasConfig {
    /// File discovery patterns.
    pub finder: FinderToml,

    /// Ensemble annotation settings.
    #[serde(default)]
    pub ensemble: EnsembleToml,

    /// Anomaly reference period.
    #[serde(default)]
    pub anomaly: AnomalyToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FinderToml {
    /// Directory pattern with {key} placeholders.
    pub path_pattern: String,
    /// File name pattern with {key} placeholders.
    pub file_pattern: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct EnsembleToml {
    /// Split the 'ens' column into r/i/p/f components.
    #[serde(default)]
    pub parse: bool,

    /// Number the members of each simulation group.
    #[serde(default)]
    pub number: bool,

    /// Grouping keys for member numbering.
    #[serde(default)]
    pub group_keys: Option<Vec<String>>,

    /// Keep only one grid per simulation.
    #[serde(default)]
    pub unique_grid: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnomalyToml {
    /// First year of the reference period.
    #[serde(default = "default_anomaly_start")]
    pub start: i32,

    /// Last year of the reference period.
    #[serde(default = "default_anomaly_end")]
    pub end: i32,
}

impl Default for AnomalyToml {
    fn default() -> Self {
        Self {
            start: default_anomaly_start(),
            end: default_anomaly_end(),
        }
    }
}

fn default_anomaly_start() -> i32 {
    1850
}

fn default_anomaly_end() -> i32 {
    1900
}

/// Loads and parses the TOML configuration file.
pub fn load(path: &Path) -> Result<BoreasConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
