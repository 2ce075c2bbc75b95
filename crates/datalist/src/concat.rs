//! Concatenation of a data list into one bulk structure.

use crate::metadata::DataList;

/// Metadata keys retained by default when concatenating CMIP ensembles.
pub const DEFAULT_RETAIN: [&str; 8] = [
    "model",
    "ens",
    "ensnumber",
    "exp",
    "postprocess",
    "table",
    "grid",
    "varn",
];

/// A data list flattened along a synthetic ensemble axis.
///
/// Payloads are concatenated in list order; each retained metadata key
/// becomes a parallel array with one entry per member (`None` where a
/// member lacks the key). `ensi` is a running member index, useful as a
/// coordinate once the original metadata maps are gone.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleConcat<T> {
    /// The payloads, in their original list order.
    pub data: Vec<T>,
    /// Per-member values of each retained key, in `retain` order.
    pub coords: Vec<(String, Vec<Option<String>>)>,
    /// Running member index, 0 to `data.len() - 1`.
    pub ensi: Vec<usize>,
}

impl<T> EnsembleConcat<T> {
    /// The number of ensemble members.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no members were concatenated.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the per-member values for one retained key.
    pub fn coord(&self, key: &str) -> Option<&[Option<String>]> {
        self.coords
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }
}

/// Flattens `list` into an [`EnsembleConcat`], keeping `retain` metadata
/// keys (or [`DEFAULT_RETAIN`] if `None`) as parallel per-member arrays.
pub fn concat_with_metadata<T>(
    list: DataList<T>,
    retain: Option<&[&str]>,
) -> EnsembleConcat<T> {
    let retain = retain.unwrap_or(&DEFAULT_RETAIN);

    let mut coords: Vec<(String, Vec<Option<String>>)> = retain
        .iter()
        .map(|key| (key.to_string(), Vec::with_capacity(list.len())))
        .collect();

    let mut data = Vec::with_capacity(list.len());
    let mut ensi = Vec::with_capacity(list.len());
    for (i, (payload, meta)) in list.into_iter().enumerate() {
        for (key, values) in &mut coords {
            values.push(meta.get(key.as_str()).cloned());
        }
        data.push(payload);
        ensi.push(i);
    }

    EnsembleConcat { data, coords, ensi }
}
