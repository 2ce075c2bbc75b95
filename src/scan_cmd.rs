use anyhow::{bail, Context, Result};
use boreas_finder::{assign_ensemble_rank, ensure_unique_grid, parse_ensemble, FileFinder, Query, ResultTable};
use tracing::info;

use crate::cli::ScanArgs;
use crate::config;

pub fn run(args: ScanArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    let finder = FileFinder::new(
        &config.finder.path_pattern,
        &config.finder.file_pattern,
    )
    .context("invalid finder patterns")?;

    let query = parse_query(&args.query)?;
    let mut table = if args.paths {
        finder.find_paths(&query, args.allow_empty)?
    } else {
        finder.find_files(&query, args.allow_empty)?
    };

    if !args.paths {
        if config.ensemble.unique_grid {
            table = ensure_unique_grid(table)?;
        }
        if config.ensemble.parse {
            table = parse_ensemble(table)?;
        }
        if config.ensemble.number {
            let group_keys: Option<Vec<&str>> = config
                .ensemble
                .group_keys
                .as_ref()
                .map(|keys| keys.iter().map(String::as_str).collect());
            table = assign_ensemble_rank(table, group_keys.as_deref())?;
        }
    }

    info!(rows = table.len(), "scan finished");
    print_table(&table);
    Ok(())
}

/// Parses `key=value` and `key=v1,v2` arguments into a query.
fn parse_query(pairs: &[String]) -> Result<Query> {
    let mut query = Query::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("expected KEY=VALUE, got '{pair}'");
        };
        if key.is_empty() || value.is_empty() {
            bail!("expected KEY=VALUE, got '{pair}'");
        }
        query = if value.contains(',') {
            query.one_of(key, value.split(','))
        } else {
            query.exact(key, value)
        };
    }
    Ok(query)
}

fn print_table(table: &ResultTable) {
    let header = table.keys().join("\t");
    println!("filename\t{header}");
    for record in table.iter() {
        let values: Vec<&str> = record.attrs().map(|(_, v)| v).collect();
        println!("{}\t{}", record.filename(), values.join("\t"));
    }
}
