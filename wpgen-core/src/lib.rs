//! Core utilities and types for the wpgen generator.
//!
//! This crate provides identifier normalization, literal escaping for the
//! emitted PHP and SQL, and output file handling shared by
//! the rest of the workspace.

mod file;
mod utils;

// File operations
pub use file::{File, Overwrite, WriteResult};
// String utilities
pub use utils::{
    escape_php_double_quoted, escape_php_string, escape_sql_string, is_numeric_literal,
    is_php_identifier, to_constant_case, to_pascal_snake_case, to_slug,
};
