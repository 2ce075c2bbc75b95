mod cli;
mod config;
mod logging;
mod scan_cmd;
mod warming_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Scan(args) => scan_cmd::run(args),
        Command::WarmingLevel(args) => warming_cmd::run(args),
    }
}
