//! Lists of (data, metadata) pairs and the operations to align them.
//!
//! Multi-model climate analyses juggle many simulations at once, each
//! identified by metadata such as model name, experiment, and ensemble
//! member. This crate represents such a collection as a [`DataList`],
//! a plain `Vec` of payload plus [`Metadata`] map, and provides the
//! recurring operations over it: selection by predicate, pairwise
//! alignment of two collections, flattening into a bulk structure, and
//! fallible per-member transformation.
//!
//! The payload type is generic; callers decide whether it is a file path,
//! a loaded time series, or a single number.

mod align;
mod concat;
mod error;
mod metadata;
mod process;
mod select;

pub use align::{match_data_list, DEFAULT_SELECT_BY};
pub use concat::{concat_with_metadata, EnsembleConcat, DEFAULT_RETAIN};
pub use error::DataListError;
pub use metadata::{format_metadata, metadata, DataList, Metadata};
pub use process::process_datalist;
pub use select::{remove_by_metadata, select_by_metadata, MetaValue, Predicate};
