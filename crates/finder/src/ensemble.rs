//! Ensemble label parsing and per-simulation bookkeeping.
//!
//! CMIP simulations are labelled with variant identifiers such as `r1i1p1`
//! (CMIP5) or `r1i1p1f2` (CMIP6). The functions here decompose those labels
//! into columns, assign a stable per-group rank, and resolve simulations
//! that are published on more than one grid.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::FinderError;
use crate::table::ResultTable;

/// Grids accepted by [`ensure_unique_grid`], in order of preference.
pub const VALID_GRIDS: [&str; 4] = ["gn", "gr", "gr1", "gm"];

/// Default grouping for [`assign_ensemble_rank`]: one group per
/// (experiment, table, variable, model).
pub const DEFAULT_GROUP_KEYS: [&str; 4] = ["exp", "table", "varn", "model"];

const SIM_KEYS: [&str; 5] = ["exp", "table", "varn", "model", "ens"];

const GRAMMAR_RIP: &str = "r{r}i{i}p{p}";
const GRAMMAR_RIPF: &str = "r{r}i{i}p{p}f{f}";

static MATCH_RIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^r(\d+)i(\d+)p(\d+)$").unwrap());
static MATCH_RIPF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^r(\d+)i(\d+)p(\d+)f(\d+)$").unwrap());

/// Splits the `ens` column into its numeric sub-components.
///
/// The grammar is detected from the first row: `r{r}i{i}p{p}f{f}` if its
/// label contains an `f` component, `r{r}i{i}p{p}` otherwise. Every other
/// row must follow the same grammar. The parsed components are appended as
/// columns `r`, `i`, `p` (and `f`).
///
/// An empty table is returned unchanged.
///
/// # Errors
///
/// Returns [`FinderError::UnknownKey`] if there is no `ens` column, and
/// [`FinderError::EnsembleGrammar`] for a row whose label does not follow
/// the detected grammar.
pub fn parse_ensemble(table: ResultTable) -> Result<ResultTable, FinderError> {
    if table.is_empty() {
        return Ok(table);
    }

    let first = column(&table, "ens")?;
    let with_f = first[0].contains('f');
    let (grammar, matcher) = if with_f {
        (GRAMMAR_RIPF, &*MATCH_RIPF)
    } else {
        (GRAMMAR_RIP, &*MATCH_RIP)
    };

    let n_components = if with_f { 4 } else { 3 };
    let mut components: Vec<Vec<String>> = vec![Vec::with_capacity(first.len()); n_components];
    for (row, label) in first.iter().enumerate() {
        let captures = matcher
            .captures(label)
            .ok_or_else(|| FinderError::EnsembleGrammar {
                value: label.clone(),
                row,
                grammar,
            })?;
        for (i, target) in components.iter_mut().enumerate() {
            target.push(captures[i + 1].to_string());
        }
    }

    let names: &[&str] = if with_f {
        &["r", "i", "p", "f"]
    } else {
        &["r", "i", "p"]
    };
    let mut table = table;
    for (name, values) in names.iter().zip(components) {
        table = table.with_column(name, values)?;
    }
    Ok(table)
}

/// Numbers the members of each simulation group.
///
/// Rows are grouped by `group_keys` (or [`DEFAULT_GROUP_KEYS`] if `None`)
/// and numbered 0, 1, 2, ... in their existing row order within each group.
/// The rank is appended as an `ensnumber` column; row order is unchanged.
///
/// # Errors
///
/// Returns [`FinderError::UnknownKey`] if a group key is not a column.
pub fn assign_ensemble_rank(
    table: ResultTable,
    group_keys: Option<&[&str]>,
) -> Result<ResultTable, FinderError> {
    let keys = group_keys.unwrap_or(&DEFAULT_GROUP_KEYS);
    let groups = table.combine_key(Some(keys), ".")?;

    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut ranks = Vec::with_capacity(groups.len());
    for group in groups {
        let counter = counters.entry(group).or_insert(0);
        ranks.push(counter.to_string());
        *counter += 1;
    }

    table.with_column("ensnumber", ranks)
}

/// Keeps one grid per simulation.
///
/// Some models publish the same simulation on several grids (native and
/// regridded). Rows are grouped by (exp, table, varn, model, ens); where a
/// group has more than one row, only the rows with the most preferred grid
/// in [`VALID_GRIDS`] are kept. Row order is otherwise preserved.
///
/// # Errors
///
/// Returns [`FinderError::UnknownKey`] if a required column is missing and
/// [`FinderError::DuplicateGrid`] if a duplicated simulation has no grid
/// from [`VALID_GRIDS`].
pub fn ensure_unique_grid(table: ResultTable) -> Result<ResultTable, FinderError> {
    let simulations = table.combine_key(Some(&SIM_KEYS), ".")?;
    let grids = column(&table, "grid")?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for simulation in &simulations {
        *counts.entry(simulation).or_insert(0) += 1;
    }

    let mut keep = Vec::with_capacity(table.len());
    for (row, simulation) in simulations.iter().enumerate() {
        if counts[simulation.as_str()] == 1 {
            keep.push(row);
            continue;
        }
        let group: Vec<usize> = simulations
            .iter()
            .enumerate()
            .filter(|(_, s)| *s == simulation)
            .map(|(i, _)| i)
            .collect();
        let preferred = VALID_GRIDS
            .iter()
            .find(|valid| group.iter().any(|&i| grids[i] == **valid))
            .ok_or_else(|| FinderError::DuplicateGrid {
                simulation: simulation.clone(),
            })?;
        if grids[row] == *preferred {
            keep.push(row);
        }
    }

    Ok(table.select_rows(&keep))
}

fn column(table: &ResultTable, key: &str) -> Result<Vec<String>, FinderError> {
    table.combine_key(Some(&[key]), ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use boreas_pattern::Bindings;

    fn table(keys: &[&str], rows: &[(&str, &[&str])]) -> ResultTable {
        let parsed = rows
            .iter()
            .map(|(filename, values)| {
                let bindings: Bindings = keys
                    .iter()
                    .zip(values.iter())
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                (filename.to_string(), bindings)
            })
            .collect();
        ResultTable::new(keys.iter().map(|k| k.to_string()).collect(), parsed, "*").unwrap()
    }

    #[test]
    fn parse_cmip5_labels() {
        let t = table(
            &["ens"],
            &[("a.nc", &["r1i1p1"]), ("b.nc", &["r10i1p2"])],
        );
        let t = parse_ensemble(t).unwrap();
        assert_eq!(t.keys(), ["ens", "r", "i", "p"]);
        assert_eq!(t.get(1).unwrap().get("r"), Some("10"));
        assert_eq!(t.get(1).unwrap().get("p"), Some("2"));
    }

    #[test]
    fn parse_cmip6_labels() {
        let t = table(
            &["ens"],
            &[("a.nc", &["r1i1p1f2"]), ("b.nc", &["r2i1p1f1"])],
        );
        let t = parse_ensemble(t).unwrap();
        assert_eq!(t.keys(), ["ens", "r", "i", "p", "f"]);
        assert_eq!(t.get(0).unwrap().get("f"), Some("2"));
    }

    #[test]
    fn parse_mixed_grammar_fails() {
        let t = table(
            &["ens"],
            &[("a.nc", &["r1i1p1"]), ("b.nc", &["r2i1p1f1"])],
        );
        let err = parse_ensemble(t).unwrap_err();
        assert_eq!(
            err,
            FinderError::EnsembleGrammar {
                value: "r2i1p1f1".to_string(),
                row: 1,
                grammar: "r{r}i{i}p{p}",
            }
        );
    }

    #[test]
    fn parse_malformed_label_fails() {
        let t = table(&["ens"], &[("a.nc", &["f1"])]);
        assert!(parse_ensemble(t).is_err());
    }

    #[test]
    fn parse_empty_table_is_noop() {
        let t = ResultTable::empty(vec!["ens".to_string()]);
        let t = parse_ensemble(t).unwrap();
        assert_eq!(t.keys(), ["ens"]);
    }

    #[test]
    fn rank_counts_within_groups() {
        let keys = ["exp", "table", "varn", "model", "ens"];
        let t = table(
            &keys,
            &[
                ("a.nc", &["ssp585", "Amon", "tas", "MIROC6", "r1i1p1f1"]),
                ("b.nc", &["ssp585", "Amon", "tas", "MIROC6", "r2i1p1f1"]),
                ("c.nc", &["ssp585", "Amon", "tas", "CanESM5", "r1i1p1f1"]),
                ("d.nc", &["ssp585", "Amon", "tas", "MIROC6", "r3i1p1f1"]),
            ],
        );
        let t = assign_ensemble_rank(t, None).unwrap();
        let ranks: Vec<&str> = t.iter().map(|r| r.get("ensnumber").unwrap()).collect();
        assert_eq!(ranks, ["0", "1", "0", "2"]);
    }

    #[test]
    fn rank_with_custom_group_keys() {
        let t = table(
            &["model", "ens"],
            &[
                ("a.nc", &["MIROC6", "r1i1p1f1"]),
                ("b.nc", &["MIROC6", "r2i1p1f1"]),
            ],
        );
        let t = assign_ensemble_rank(t, Some(&["model"])).unwrap();
        let ranks: Vec<&str> = t.iter().map(|r| r.get("ensnumber").unwrap()).collect();
        assert_eq!(ranks, ["0", "1"]);
    }

    #[test]
    fn rank_missing_group_key_fails() {
        let t = table(&["ens"], &[("a.nc", &["r1i1p1f1"])]);
        assert!(assign_ensemble_rank(t, None).is_err());
    }

    #[test]
    fn unique_grid_prefers_native() {
        let keys = ["exp", "table", "varn", "model", "ens", "grid"];
        let t = table(
            &keys,
            &[
                ("a.nc", &["ssp585", "Amon", "tas", "M1", "r1i1p1f1", "gr"]),
                ("b.nc", &["ssp585", "Amon", "tas", "M1", "r1i1p1f1", "gn"]),
                ("c.nc", &["ssp585", "Amon", "tas", "M2", "r1i1p1f1", "gr1"]),
            ],
        );
        let t = ensure_unique_grid(t).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(0).unwrap().filename(), "b.nc");
        assert_eq!(t.get(0).unwrap().get("grid"), Some("gn"));
        assert_eq!(t.get(1).unwrap().filename(), "c.nc");
    }

    #[test]
    fn unique_grid_all_invalid_fails() {
        let keys = ["exp", "table", "varn", "model", "ens", "grid"];
        let t = table(
            &keys,
            &[
                ("a.nc", &["ssp585", "Amon", "tas", "M1", "r1i1p1f1", "gx"]),
                ("b.nc", &["ssp585", "Amon", "tas", "M1", "r1i1p1f1", "gy"]),
            ],
        );
        let err = ensure_unique_grid(t).unwrap_err();
        assert!(matches!(err, FinderError::DuplicateGrid { .. }));
    }

    #[test]
    fn unique_grid_singletons_untouched() {
        let keys = ["exp", "table", "varn", "model", "ens", "grid"];
        let t = table(
            &keys,
            &[("a.nc", &["ssp585", "Amon", "tas", "M1", "r1i1p1f1", "weird"])],
        );
        let t = ensure_unique_grid(t).unwrap();
        assert_eq!(t.len(), 1);
    }
}
