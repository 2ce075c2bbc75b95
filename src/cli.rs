use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Boreas climate model archive tools.
#[derive(Parser)]
#[command(
    name = "boreas",
    version,
    about = "File discovery and warming-level analysis for climate model ensembles"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Discover model output files matching a query.
    Scan(ScanArgs),
    /// Find the period in which a warming level is first reached.
    WarmingLevel(WarmingLevelArgs),
}

/// Arguments for the `scan` subcommand.
#[derive(clap::Args)]
pub struct ScanArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "boreas.toml")]
    pub config: PathBuf,

    /// Return an empty table instead of failing when nothing matches.
    #[arg(long)]
    pub allow_empty: bool,

    /// Match directories instead of files.
    #[arg(long)]
    pub paths: bool,

    /// Query constraints as key=value or key=v1,v2 pairs.
    #[arg(value_name = "KEY=VALUE")]
    pub query: Vec<String>,
}

/// Arguments for the `warming-level` subcommand.
#[derive(clap::Args)]
pub struct WarmingLevelArgs {
    /// Path to a CSV file with year,value rows of annual mean temperature.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to TOML configuration file; its [anomaly] section supplies the
    /// reference period unless overridden by --start/--end.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Warming levels in degrees, e.g. 1.5 2.0.
    #[arg(short = 't', long = "threshold", required = true, num_args = 1..)]
    pub thresholds: Vec<f64>,

    /// Length of the warming period in years.
    #[arg(long, default_value_t = 20)]
    pub n_years: usize,

    /// First year of the reference period (overrides the config).
    #[arg(long)]
    pub start: Option<i32>,

    /// Last year of the reference period (overrides the config).
    #[arg(long)]
    pub end: Option<i32>,
}
