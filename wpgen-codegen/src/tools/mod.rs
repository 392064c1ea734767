//! Standalone WordPress helper generators.
//!
//! Each tool takes a plain options struct and returns the generated text.
//! Only missing required inputs are errors; everything else falls back to
//! a default.

mod acf_field;
mod db_prefix;
mod delete_products;
mod migration;
mod plugin_header;
mod rest_route;

pub use acf_field::{
    ACF_CATEGORIES, AcfFieldOptions, DEFAULT_ACF_CATEGORY, DEFAULT_ACF_TEXT_DOMAIN,
    DEFAULT_ACF_VERSION_CONSTANT,
};
pub use db_prefix::{DbPrefixOptions, WOOCOMMERCE_TABLES, parse_site_ids};
pub use delete_products::DeleteProductsOptions;
pub use migration::{MigrationOptions, normalize_url};
pub use plugin_header::PluginHeaderOptions;
pub use rest_route::{
    ArgLocation, HttpMethod, Permission, RestArg, RestRouteOptions, detect_path_params,
};

/// Default WordPress table prefix.
pub const DEFAULT_TABLE_PREFIX: &str = "wp_";

/// Trim a table prefix and make sure it ends with `_`. Blank stays blank.
pub fn normalize_prefix(prefix: &str) -> String {
    let prefix = prefix.trim();
    if prefix.is_empty() || prefix.ends_with('_') {
        prefix.to_string()
    } else {
        format!("{}_", prefix)
    }
}

/// Like [`normalize_prefix`], but blank becomes [`DEFAULT_TABLE_PREFIX`].
pub(crate) fn prefix_or_default(prefix: &str) -> String {
    match normalize_prefix(prefix) {
        p if p.is_empty() => DEFAULT_TABLE_PREFIX.to_string(),
        p => p,
    }
}
