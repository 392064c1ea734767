//! Plugin header comment.

use eyre::{Result, bail};
use indexmap::IndexSet;

use crate::builder::CodeBuilder;

/// Fields of a WordPress plugin header. Blank fields are left out.
#[derive(Debug, Clone, Default)]
pub struct PluginHeaderOptions {
    pub name: String,
    pub uri: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub author_uri: String,
    pub license: String,
    pub license_uri: String,
    pub text_domain: String,
    pub domain_path: String,
    pub network: bool,
    /// Comma-separated plugin slugs.
    pub requires_plugins: String,
    /// Add `woocommerce` to `Requires Plugins`.
    pub woocommerce: bool,
}

impl PluginHeaderOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The de-duplicated `Requires Plugins` list, in input order.
    pub fn required_plugins(&self) -> Vec<String> {
        let mut required: IndexSet<String> = self
            .requires_plugins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if self.woocommerce {
            required.insert("woocommerce".to_string());
        }
        required.into_iter().collect()
    }

    pub fn generate(&self) -> Result<String> {
        let name = self.name.trim();
        if name.is_empty() {
            bail!("please enter a plugin name");
        }

        let mut fields = vec![format!("Plugin Name: {}", name)];
        let mut field = |label: &str, value: &str| {
            let value = value.trim();
            if !value.is_empty() {
                fields.push(format!("{}: {}", label, value));
            }
        };
        field("Plugin URI", &self.uri);
        field("Description", &self.description);
        field("Version", &self.version);
        field("Author", &self.author);
        field("Author URI", &self.author_uri);
        field("License", &self.license);
        field("License URI", &self.license_uri);
        field("Requires Plugins", &self.required_plugins().join(", "));
        field("Text Domain", &self.text_domain);
        field("Domain Path", &self.domain_path);
        if self.network {
            fields.push("Network: true".to_string());
        }

        let mut b = CodeBuilder::php();
        b.push_line("<?php");
        b.push_docblock(&fields);
        b.push_blank();
        b.push_line("// Prevent direct access to this file");
        b.push_block("if ( ! defined( 'ABSPATH' ) ) {", "}", |b| {
            b.push_line("exit;");
        });
        Ok(b.build())
    }
}
