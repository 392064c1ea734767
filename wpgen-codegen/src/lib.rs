//! Code generators for the wpgen CLI.
//!
//! - [`crud`] - the custom-table CRUD plugin renderer
//! - [`pipeline`] - phased generation with diagnostics
//! - [`tools`] - standalone SQL and PHP helpers
//! - [`builder`] - indentation-aware text building

pub mod builder;
pub mod crud;
pub mod pipeline;
pub mod tools;
