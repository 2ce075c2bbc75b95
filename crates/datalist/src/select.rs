//! Selection of data list members by metadata predicate.

use crate::metadata::{DataList, Metadata};

/// One constraint on a metadata value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    /// The key must be present, with any value.
    Any,
    /// The key must be present with exactly this value.
    Equals(String),
}

/// A conjunction of per-key constraints on metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    entries: Vec<(String, MetaValue)>,
}

impl Predicate {
    /// Creates a predicate with no constraints; it matches every member.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `key` to equal `value`.
    pub fn equals(mut self, key: &str, value: &str) -> Self {
        self.entries
            .push((key.to_string(), MetaValue::Equals(value.to_string())));
        self
    }

    /// Requires `key` to be present, with any value.
    pub fn any(mut self, key: &str) -> Self {
        self.entries.push((key.to_string(), MetaValue::Any));
        self
    }

    /// Tests the predicate against one metadata map.
    ///
    /// A missing key never matches; it excludes the member rather than
    /// raising an error.
    pub fn matches(&self, meta: &Metadata) -> bool {
        self.entries.iter().all(|(key, value)| match meta.get(key) {
            None => false,
            Some(_) if matches!(value, MetaValue::Any) => true,
            Some(actual) => matches!(value, MetaValue::Equals(expected) if expected == actual),
        })
    }
}

/// Returns the members whose metadata matches the predicate, preserving
/// order.
pub fn select_by_metadata<T: Clone>(list: &DataList<T>, predicate: &Predicate) -> DataList<T> {
    list.iter()
        .filter(|(_, meta)| predicate.matches(meta))
        .cloned()
        .collect()
}

/// Returns the members whose metadata does *not* match the predicate.
///
/// Together with [`select_by_metadata`] this partitions the list exactly.
pub fn remove_by_metadata<T: Clone>(list: &DataList<T>, predicate: &Predicate) -> DataList<T> {
    list.iter()
        .filter(|(_, meta)| !predicate.matches(meta))
        .cloned()
        .collect()
}
