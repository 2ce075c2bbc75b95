//! Metadata maps and the (data, metadata) list they annotate.

use std::collections::BTreeMap;

/// String-keyed metadata attached to one piece of data.
///
/// Ordered so formatting and iteration are deterministic.
pub type Metadata = BTreeMap<String, String>;

/// A list of data payloads, each annotated with its metadata.
///
/// The payload type is opaque to this crate; it is typically a loaded
/// dataset or a computed time series.
pub type DataList<T> = Vec<(T, Metadata)>;

/// Builds a [`Metadata`] map from string pairs.
pub fn metadata<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Metadata
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Formats metadata as `key=value, key=value` for log and error messages.
pub fn format_metadata(meta: &Metadata) -> String {
    meta.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}
