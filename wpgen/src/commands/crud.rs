use std::path::PathBuf;

use clap::Args;
use eyre::{Context, OptionExt, Result};
use wpgen_codegen::pipeline::Pipeline;
use wpgen_manifest::{DEFAULT_FILENAME, WpgenToml};

use super::{UnwrapOrExit, emit};

#[derive(Args)]
pub struct CrudCommand {
    /// Path to wpgen.toml
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    pub config: PathBuf,

    /// Write the plugin to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CrudCommand {
    pub fn run(&self) -> Result<()> {
        let wpgen_toml = WpgenToml::open(&self.config).unwrap_or_exit();
        let ctx = Pipeline::new()
            .run_config(&wpgen_toml.manifest().entity)
            .wrap_err("Failed to generate plugin")?;

        for diag in ctx.warnings() {
            eprintln!("{}", diag);
        }

        let php = ctx.output.as_deref().ok_or_eyre("render phase produced no output")?;
        emit(self.output.as_deref(), php)
    }
}
