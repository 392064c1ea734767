use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use wpgen_codegen::tools::PluginHeaderOptions;

use super::emit;

#[derive(Args)]
pub struct PluginHeaderCommand {
    /// Plugin name
    pub name: String,

    #[arg(long, default_value = "")]
    pub uri: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long = "plugin-version", default_value = "")]
    pub plugin_version: String,

    #[arg(long, default_value = "")]
    pub author: String,

    #[arg(long, default_value = "")]
    pub author_uri: String,

    #[arg(long, default_value = "")]
    pub license: String,

    #[arg(long, default_value = "")]
    pub license_uri: String,

    #[arg(long, default_value = "")]
    pub text_domain: String,

    #[arg(long, default_value = "")]
    pub domain_path: String,

    /// Network-activated plugin (multisite)
    #[arg(long)]
    pub network: bool,

    /// Comma-separated slugs for "Requires Plugins"
    #[arg(long, default_value = "")]
    pub requires: String,

    /// Require WooCommerce
    #[arg(long)]
    pub woocommerce: bool,

    /// Write the header to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl PluginHeaderCommand {
    pub fn run(&self) -> Result<()> {
        let options = PluginHeaderOptions {
            name: self.name.clone(),
            uri: self.uri.clone(),
            description: self.description.clone(),
            version: self.plugin_version.clone(),
            author: self.author.clone(),
            author_uri: self.author_uri.clone(),
            license: self.license.clone(),
            license_uri: self.license_uri.clone(),
            text_domain: self.text_domain.clone(),
            domain_path: self.domain_path.clone(),
            network: self.network,
            requires_plugins: self.requires.clone(),
            woocommerce: self.woocommerce,
        };
        emit(self.output.as_deref(), &options.generate()?)
    }
}
