use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use wpgen_codegen::tools::{DEFAULT_TABLE_PREFIX, MigrationOptions};

use super::emit;

#[derive(Args)]
pub struct MigrationSqlCommand {
    /// Current site URL (e.g. https://staging.example.com)
    #[arg(long)]
    pub from: String,

    /// New site URL
    #[arg(long)]
    pub to: String,

    /// Table prefix
    #[arg(short, long, default_value = DEFAULT_TABLE_PREFIX)]
    pub prefix: String,

    /// Write the SQL to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl MigrationSqlCommand {
    pub fn run(&self) -> Result<()> {
        let sql = MigrationOptions::new(&self.from, &self.to)
            .with_prefix(&self.prefix)
            .generate()?;
        emit(self.output.as_deref(), &sql)
    }
}
