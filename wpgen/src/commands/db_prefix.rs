use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use wpgen_codegen::tools::{DbPrefixOptions, parse_site_ids};

use super::emit;

#[derive(Args)]
pub struct DbPrefixCommand {
    /// Current table prefix (e.g. wp_)
    #[arg(long = "old")]
    pub old_prefix: String,

    /// New table prefix
    #[arg(long = "new")]
    pub new_prefix: String,

    /// Also rename WooCommerce tables
    #[arg(long)]
    pub woocommerce: bool,

    /// Rename multisite sub-site tables
    #[arg(long)]
    pub multisite: bool,

    /// Comma-separated sub-site ids (e.g. "2,3,5")
    #[arg(long, default_value = "", requires = "multisite")]
    pub sites: String,

    /// Write the SQL to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl DbPrefixCommand {
    pub fn options(&self) -> DbPrefixOptions {
        DbPrefixOptions {
            woocommerce: self.woocommerce,
            multisite: self.multisite,
            site_ids: if self.multisite {
                parse_site_ids(&self.sites)
            } else {
                Vec::new()
            },
            ..DbPrefixOptions::new(&self.old_prefix, &self.new_prefix)
        }
    }

    pub fn run(&self) -> Result<()> {
        let sql = self.options().generate()?;
        emit(self.output.as_deref(), &format!("{}\n", sql))
    }
}
