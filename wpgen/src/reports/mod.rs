//! Report rendering for CLI output.

mod check;
mod output;

pub use check::{CheckReport, EntitySummary};
pub use output::{Output, Report, TerminalOutput};
