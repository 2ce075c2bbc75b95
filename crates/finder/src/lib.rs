//! File discovery over structured directory trees.
//!
//! Climate model output archives encode metadata in their paths, e.g.
//! `/data/cmip6/ssp585/Amon/tas_Amon_MIROC6_ssp585_r1i1p1f1_gn.nc`. A
//! [`FileFinder`] is configured with placeholder templates for the path and
//! the file name, expands a [`Query`] into concrete glob patterns, scans
//! the filesystem, and parses every match back into its metadata. Results
//! come back as a [`ResultTable`] that can be searched, sliced, and
//! annotated with ensemble information.
//!
//! ```no_run
//! use boreas_finder::{FileFinder, Query};
//!
//! # fn main() -> Result<(), boreas_finder::FinderError> {
//! let finder = FileFinder::new(
//!     "/data/cmip6/{exp}/{table}",
//!     "{varn}_{table}_{model}_{exp}_{ens}_{grid}.nc",
//! )?;
//! let files = finder.find_files(&Query::new().exact("varn", "tas"), false)?;
//! for record in files.iter() {
//!     println!("{} from {}", record.filename(), record.get("model").unwrap_or("?"));
//! }
//! # Ok(())
//! # }
//! ```

mod ensemble;
mod error;
mod finder;
mod query;
mod scan;
mod table;

pub use ensemble::{
    assign_ensemble_rank, ensure_unique_grid, parse_ensemble, DEFAULT_GROUP_KEYS, VALID_GRIDS,
};
pub use error::FinderError;
pub use finder::FileFinder;
pub use query::{Query, QueryValue};
pub use table::{Record, ResultTable};
