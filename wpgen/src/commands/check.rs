use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use wpgen_manifest::{DEFAULT_FILENAME, WpgenToml};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to wpgen.toml
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let wpgen_toml = WpgenToml::open(&self.config).unwrap_or_exit();
        let report = ops::check(wpgen_toml.manifest(), &self.config)?;

        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
