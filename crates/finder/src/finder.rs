//! Pattern-driven discovery of files on disk.

use boreas_pattern::{sort_natural, Bindings, Template};
use tracing::{debug, info, warn};

use crate::error::FinderError;
use crate::query::Query;
use crate::scan::{scan, ScanKind};
use crate::table::ResultTable;

/// Discovers files whose locations follow a structured naming scheme.
///
/// A finder is built from two placeholder templates, one for the directory
/// part and one for the file name part, e.g.
/// `"{root}/{exp}/{table}/"` and `"{varn}_{table}_{model}_{exp}_{ens}.nc"`.
/// Placeholders shared between the two must resolve to the same value in
/// any given match.
#[derive(Debug, Clone)]
pub struct FileFinder {
    path: Template,
    file: Template,
    full: Template,
}

impl FileFinder {
    /// Creates a finder from a directory pattern and a file name pattern.
    ///
    /// The directory pattern is normalized to end with exactly one `/`.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Pattern`] if either pattern is malformed.
    pub fn new(path_pattern: &str, file_pattern: &str) -> Result<Self, FinderError> {
        let path = Template::new_path(path_pattern)?;
        let file = Template::new(file_pattern)?;
        let full = Template::new(&format!("{path}{file}"))?;
        Ok(Self { path, file, full })
    }

    /// All placeholder keys, path keys first, file-only keys after, each in
    /// first-appearance order without duplicates.
    pub fn keys(&self) -> &[String] {
        self.full.keys()
    }

    /// The placeholder keys of the directory pattern.
    pub fn keys_path(&self) -> &[String] {
        self.path.keys()
    }

    /// The placeholder keys of the file name pattern.
    pub fn keys_file(&self) -> &[String] {
        self.file.keys()
    }

    /// Substitutes `bindings` into the directory pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::MissingKey`] if a placeholder has no binding.
    ///
    /// [`PatternError::MissingKey`]: boreas_pattern::PatternError::MissingKey
    pub fn create_path_name(&self, bindings: &Bindings) -> Result<String, FinderError> {
        Ok(self.path.format(bindings)?)
    }

    /// Substitutes `bindings` into the file name pattern.
    pub fn create_file_name(&self, bindings: &Bindings) -> Result<String, FinderError> {
        Ok(self.file.format(bindings)?)
    }

    /// Substitutes `bindings` into the concatenated path + file pattern.
    pub fn create_full_name(&self, bindings: &Bindings) -> Result<String, FinderError> {
        Ok(self.full.format(bindings)?)
    }

    /// Finds directories matching the directory pattern under `query`.
    ///
    /// Returned filenames keep a trailing `/`. An empty query leaves every
    /// placeholder unconstrained.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::NoMatch`] if nothing matched and `allow_empty`
    /// is false.
    pub fn find_paths(
        &self,
        query: &Query,
        allow_empty: bool,
    ) -> Result<ResultTable, FinderError> {
        self.find(&self.path, query, ScanKind::Directories, "paths", allow_empty)
    }

    /// Finds files matching the full pattern under `query`.
    ///
    /// Every placeholder not constrained by the query defaults to a
    /// wildcard, so an empty query enumerates everything the patterns can
    /// reach.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::NoMatch`] if nothing matched and `allow_empty`
    /// is false.
    pub fn find_files(
        &self,
        query: &Query,
        allow_empty: bool,
    ) -> Result<ResultTable, FinderError> {
        self.find(&self.full, query, ScanKind::Files, "files", allow_empty)
    }

    fn find(
        &self,
        template: &Template,
        query: &Query,
        kind: ScanKind,
        what: &'static str,
        allow_empty: bool,
    ) -> Result<ResultTable, FinderError> {
        let keys = template.keys();
        for key in query.keys() {
            if !keys.iter().any(|k| k == key) {
                warn!(key, "query key not present in pattern, ignoring");
            }
        }

        let mut parsed: Vec<(String, Bindings)> = Vec::new();
        for combination in query.combinations(keys) {
            let pattern = template.format(&combination)?;
            debug!(%pattern, "scanning");
            let mut matches = scan(&pattern, kind);
            sort_natural(&mut matches);
            for filename in matches {
                let bindings = template.parse(&filename).ok_or_else(|| {
                    FinderError::Unparseable {
                        path: filename.clone(),
                        pattern: template.to_string(),
                    }
                })?;
                parsed.push((filename, bindings));
            }
        }

        info!(count = parsed.len(), "found {what}");
        if parsed.is_empty() && !allow_empty {
            return Err(FinderError::NoMatch {
                what,
                pattern: template.to_string(),
            });
        }

        ResultTable::new(keys.to_vec(), parsed, &query.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_split_by_part() {
        let finder = FileFinder::new("{root}/{exp}", "{varn}_{exp}.nc").unwrap();
        assert_eq!(finder.keys_path(), ["root", "exp"]);
        assert_eq!(finder.keys_file(), ["varn", "exp"]);
        assert_eq!(finder.keys(), ["root", "exp", "varn"]);
    }

    #[test]
    fn create_names() {
        let finder = FileFinder::new("{root}/{exp}", "{varn}_{exp}.nc").unwrap();
        let bindings: Bindings = [
            ("root".to_string(), "/data".to_string()),
            ("exp".to_string(), "ssp585".to_string()),
            ("varn".to_string(), "tas".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(finder.create_path_name(&bindings).unwrap(), "/data/ssp585/");
        assert_eq!(finder.create_file_name(&bindings).unwrap(), "tas_ssp585.nc");
        assert_eq!(
            finder.create_full_name(&bindings).unwrap(),
            "/data/ssp585/tas_ssp585.nc"
        );
    }

    #[test]
    fn create_name_missing_key() {
        let finder = FileFinder::new("{root}", "{varn}.nc").unwrap();
        let err = finder.create_full_name(&Bindings::new()).unwrap_err();
        assert!(matches!(err, FinderError::Pattern(_)));
    }

    #[test]
    fn bad_pattern_is_rejected() {
        assert!(FileFinder::new("{root", "{varn}.nc").is_err());
        assert!(FileFinder::new("{root}", "{}.nc").is_err());
    }
}
