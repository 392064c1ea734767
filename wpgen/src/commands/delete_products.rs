use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use wpgen_codegen::tools::{DEFAULT_TABLE_PREFIX, DeleteProductsOptions};

use super::emit;

#[derive(Args)]
pub struct DeleteProductsCommand {
    /// Table prefix
    #[arg(short, long, default_value = DEFAULT_TABLE_PREFIX)]
    pub prefix: String,

    /// Clear lookup tables with TRUNCATE instead of DELETE
    #[arg(long)]
    pub truncate: bool,

    /// Write the SQL to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl DeleteProductsCommand {
    pub fn run(&self) -> Result<()> {
        let sql = DeleteProductsOptions::new(&self.prefix)
            .with_truncate(self.truncate)
            .generate();
        tracing::warn!("generated SQL is destructive, back up the database first");
        emit(self.output.as_deref(), &sql)
    }
}
