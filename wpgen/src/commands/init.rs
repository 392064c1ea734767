use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use wpgen_core::{File, Overwrite, WriteResult};
use wpgen_manifest::{DEFAULT_FILENAME, starter_manifest};

#[derive(Args)]
pub struct InitCommand {
    /// Entity name to seed the manifest with
    #[arg(default_value = "item")]
    pub entity: String,

    /// Manifest path
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    pub output: PathBuf,

    /// Overwrite an existing manifest
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let overwrite = if self.force {
            Overwrite::Always
        } else {
            Overwrite::IfMissing
        };

        let result = File::new(&self.output, starter_manifest(&self.entity))
            .with_overwrite(overwrite)
            .write()?;

        match result {
            WriteResult::Written => {
                println!("Created {}", self.output.display());
                println!();
                println!("Next steps:");
                println!("  edit the [[entity.columns]] rows");
                println!("  wpgen crud --output plugin.php");
            }
            WriteResult::Skipped => {
                eprintln!(
                    "{} already exists (use --force to overwrite)",
                    self.output.display()
                );
            }
        }

        Ok(())
    }
}
