//! Entity manifest (`wpgen.toml`) parsing and validation.
//!
//! The manifest stands in for the generator's input form: entity metadata,
//! option toggles and the ordered column table. Parsing errors carry source
//! spans and render through [`miette`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod entity;
mod error;
mod file;
mod parse;

pub use entity::{ColumnRow, EntityConfig, Manifest};
pub use error::{Error, Result, SourceContext};
pub use file::{WpgenToml, starter_manifest};
pub use parse::{DEFAULT_FILENAME, parse_manifest};
