//! Placeholder templates for the Boreas file finder.
//!
//! A template is a string with named `{key}` placeholders, e.g.
//! `"{varn}_{table}_{model}_{exp}_{ens}.nc"`. This crate compiles such a
//! template into a formatter (bindings -> concrete string) and a parser
//! (concrete string -> bindings), and provides the natural (numeric-aware)
//! string ordering used to sort discovered files.
//!
//! # Quick start
//!
//! ```
//! use boreas_pattern::{Bindings, Template};
//!
//! let tmpl = Template::new("{varn}_{model}.nc")?;
//! assert_eq!(tmpl.keys(), ["varn", "model"]);
//!
//! let mut bindings = Bindings::new();
//! bindings.insert("varn".to_string(), "tas".to_string());
//! bindings.insert("model".to_string(), "MIROC6".to_string());
//!
//! let name = tmpl.format(&bindings)?;
//! assert_eq!(name, "tas_MIROC6.nc");
//! assert_eq!(tmpl.parse(&name), Some(bindings));
//! # Ok::<(), boreas_pattern::PatternError>(())
//! ```

mod error;
mod natural;
mod template;

pub use error::PatternError;
pub use natural::{natural_cmp, sort_natural};
pub use template::{Bindings, Template, WILDCARD};
