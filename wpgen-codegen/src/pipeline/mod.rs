//! Generation pipeline for the CRUD plugin.
//!
//! [`Pipeline`] runs a fixed sequence of phases over a
//! [`GenerationContext`]:
//!
//! - normalize: column rows → columns, defaults, input warnings
//! - ddl: `CREATE TABLE` column lines
//! - allow-list: writable columns
//! - render: the PHP file
//!
//! Problems with the input that do not stop generation are collected as
//! [`Diagnostic`]s instead of failing the run.

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::GenerationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use runner::Pipeline;
