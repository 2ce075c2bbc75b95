//! Queryable table of discovered files and their parsed attributes.

use std::collections::HashSet;
use std::ops::Range;

use boreas_pattern::Bindings;

use crate::error::FinderError;
use crate::query::Query;

/// One row: a filename plus its attribute values (parallel to the table's
/// attribute keys).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Row {
    pub(crate) filename: String,
    pub(crate) values: Vec<String>,
}

/// A borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a ResultTable,
    row: usize,
}

impl<'a> Record<'a> {
    /// The matched filename (for path searches: the directory, with a
    /// trailing separator).
    pub fn filename(&self) -> &'a str {
        &self.table.rows[self.row].filename
    }

    /// Returns the value of one attribute.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        let idx = self.table.keys.iter().position(|k| k == key)?;
        Some(&self.table.rows[self.row].values[idx])
    }

    /// Iterates over (key, value) attribute pairs in column order.
    pub fn attrs(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        let row = &self.table.rows[self.row];
        self.table
            .keys
            .iter()
            .zip(row.values.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copies the attributes into owned bindings (without the filename).
    pub fn to_bindings(&self) -> Bindings {
        self.attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// An ordered, queryable collection of (filename, attributes) records.
///
/// Created by [`FileFinder::find_files`] / [`FileFinder::find_paths`]; rows
/// are never mutated afterwards except by attaching derived columns (see
/// [`parse_ensemble`] and [`assign_ensemble_rank`]), which preserve row
/// order and identity.
///
/// Invariant: the period-joined combination of all attribute values is
/// unique across rows. A query that maps two distinct filesystem matches to
/// the same attribute tuple is a configuration error and fails at
/// construction.
///
/// [`FileFinder::find_files`]: crate::FileFinder::find_files
/// [`FileFinder::find_paths`]: crate::FileFinder::find_paths
/// [`parse_ensemble`]: crate::parse_ensemble
/// [`assign_ensemble_rank`]: crate::assign_ensemble_rank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    keys: Vec<String>,
    rows: Vec<Row>,
}

impl ResultTable {
    /// Builds a table from parsed rows, enforcing the uniqueness invariant.
    ///
    /// `query` is the rendered query that produced the rows; it is reported
    /// verbatim when two rows collide on the same attribute combination.
    pub(crate) fn new(
        keys: Vec<String>,
        parsed: Vec<(String, Bindings)>,
        query: &str,
    ) -> Result<Self, FinderError> {
        let mut rows = Vec::with_capacity(parsed.len());
        for (filename, bindings) in parsed {
            let mut values = Vec::with_capacity(keys.len());
            for key in &keys {
                let value = bindings
                    .get(key)
                    .ok_or_else(|| FinderError::UnknownKey { key: key.clone() })?;
                values.push(value.clone());
            }
            rows.push(Row { filename, values });
        }
        let table = Self { keys, rows };
        table.check_unique(query)?;
        Ok(table)
    }

    /// Creates an empty table with the given attribute columns.
    pub(crate) fn empty(keys: Vec<String>) -> Self {
        Self {
            keys,
            rows: Vec::new(),
        }
    }

    fn check_unique(&self, query: &str) -> Result<(), FinderError> {
        let mut seen = HashSet::with_capacity(self.rows.len());
        for combination in self.combined_all() {
            if !seen.insert(combination.clone()) {
                return Err(FinderError::AmbiguousMetadata {
                    combination,
                    query: query.to_string(),
                });
            }
        }
        Ok(())
    }

    fn combined_all(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.values.join("."))
            .collect()
    }

    /// Returns the attribute column names, in order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the record at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Record<'_>> {
        (index < self.rows.len()).then_some(Record { table: self, row: index })
    }

    /// Iterates over the records in row order.
    pub fn iter(&self) -> impl Iterator<Item = Record<'_>> {
        (0..self.rows.len()).map(move |row| Record { table: self, row })
    }

    /// Returns a copy of the given row range as a new table.
    pub fn slice(&self, range: Range<usize>) -> Self {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        Self {
            keys: self.keys.clone(),
            rows: self.rows[start..end].to_vec(),
        }
    }

    /// Joins the string values of `keys` with `sep`, row by row, in column
    /// order. With `keys = None` all attribute columns are used.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::UnknownKey`] for a key that is not a column.
    pub fn combine_key(
        &self,
        keys: Option<&[&str]>,
        sep: &str,
    ) -> Result<Vec<String>, FinderError> {
        let indices: Vec<usize> = match keys {
            None => (0..self.keys.len()).collect(),
            Some(names) => names
                .iter()
                .map(|name| {
                    self.keys
                        .iter()
                        .position(|k| k == name)
                        .ok_or_else(|| FinderError::UnknownKey {
                            key: name.to_string(),
                        })
                })
                .collect::<Result<_, _>>()?,
        };

        Ok(self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&i| row.values[i].as_str())
                    .collect::<Vec<_>>()
                    .join(sep)
            })
            .collect())
    }

    /// Returns the row subset matching `query`.
    ///
    /// Keys absent from the query are not constrained. An *empty* query
    /// returns an empty table, not all rows -- the opposite of
    /// [`FileFinder::find_files`], where an empty query defaults every key
    /// to wildcard. Downstream callers depend on either behaviour, so the
    /// asymmetry is deliberate and preserved.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::UnknownKey`] for a key that is not a column.
    ///
    /// [`FileFinder::find_files`]: crate::FileFinder::find_files
    pub fn search(&self, query: &Query) -> Result<Self, FinderError> {
        if query.is_empty() {
            return Ok(Self::empty(self.keys.clone()));
        }

        let constraints: Vec<(usize, &crate::query::QueryValue)> = query
            .entries()
            .map(|(key, value)| {
                let idx = self
                    .keys
                    .iter()
                    .position(|k| k == key)
                    .ok_or_else(|| FinderError::UnknownKey {
                        key: key.to_string(),
                    })?;
                Ok((idx, value))
            })
            .collect::<Result<_, FinderError>>()?;

        let rows = self
            .rows
            .iter()
            .filter(|row| {
                constraints
                    .iter()
                    .all(|(idx, value)| value.matches(&row.values[*idx]))
            })
            .cloned()
            .collect();

        // Subset of unique rows stays unique.
        Ok(Self {
            keys: self.keys.clone(),
            rows,
        })
    }

    /// Keeps only the rows at `indices`, in the given order.
    ///
    /// A subset of unique rows stays unique, so no recheck is needed.
    pub(crate) fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            keys: self.keys.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Appends a derived column, preserving row order.
    pub(crate) fn with_column(
        mut self,
        key: &str,
        values: Vec<String>,
    ) -> Result<Self, FinderError> {
        if self.keys.iter().any(|k| k == key) {
            return Err(FinderError::DuplicateColumn {
                key: key.to_string(),
            });
        }
        debug_assert_eq!(values.len(), self.rows.len());
        self.keys.push(key.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.values.push(value);
        }
        Ok(self)
    }
}
