//! Operations behind the CLI commands that produce reports.

mod check;

pub use check::check;
