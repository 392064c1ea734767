//! Table prefix rename SQL.

use eyre::{Result, bail};

use super::normalize_prefix;

/// Core tables renamed for every site, in output order.
const SITE_TABLES: [&str; 9] = [
    "comments",
    "commentmeta",
    "options",
    "postmeta",
    "posts",
    "terms",
    "termmeta",
    "term_relationships",
    "term_taxonomy",
];

/// WooCommerce and Action Scheduler table suffixes.
pub const WOOCOMMERCE_TABLES: [&str; 38] = [
    "wc_admin_notes",
    "wc_admin_note_actions",
    "wc_category_lookup",
    "wc_customer_lookup",
    "wc_download_log",
    "wc_orders",
    "wc_orders_meta",
    "wc_order_addresses",
    "wc_order_coupon_lookup",
    "wc_order_operational_data",
    "wc_order_product_lookup",
    "wc_order_stats",
    "wc_order_tax_lookup",
    "wc_product_attributes_lookup",
    "wc_product_download_directories",
    "wc_product_meta_lookup",
    "wc_rate_limits",
    "wc_reserved_stock",
    "wc_tax_rate_classes",
    "wc_webhooks",
    "woocommerce_api_keys",
    "woocommerce_attribute_taxonomies",
    "woocommerce_downloadable_product_permissions",
    "woocommerce_log",
    "woocommerce_order_itemmeta",
    "woocommerce_order_items",
    "woocommerce_payment_tokenmeta",
    "woocommerce_payment_tokens",
    "woocommerce_sessions",
    "woocommerce_shipping_zones",
    "woocommerce_shipping_zone_locations",
    "woocommerce_shipping_zone_methods",
    "woocommerce_tax_rates",
    "woocommerce_tax_rate_locations",
    "actionscheduler_actions",
    "actionscheduler_claims",
    "actionscheduler_groups",
    "actionscheduler_logs",
];

/// Options for the `db-prefix` tool.
#[derive(Debug, Clone, Default)]
pub struct DbPrefixOptions {
    pub old_prefix: String,
    pub new_prefix: String,
    pub woocommerce: bool,
    pub multisite: bool,
    /// Sub-site blog ids; only used when `multisite` is set.
    pub site_ids: Vec<u32>,
}

/// Parse a comma-separated list of blog ids, ignoring anything that is not
/// a positive integer.
pub fn parse_site_ids(input: &str) -> Vec<u32> {
    input
        .split(',')
        .filter_map(|id| id.trim().parse::<u32>().ok())
        .filter(|id| *id > 0)
        .collect()
}

fn rename(old: &str, new: &str, table: &str) -> String {
    format!("RENAME TABLE {old}{table} TO {new}{table};")
}

fn update_options(table: &str, old: &str, new: &str) -> String {
    format!(
        "UPDATE {table} SET option_name = REPLACE(option_name, '{old}', '{new}') WHERE option_name LIKE '{old}%';"
    )
}

fn update_usermeta(table: &str, old: &str, new: &str) -> String {
    format!(
        "UPDATE {table} SET meta_key = REPLACE(meta_key, '{old}', '{new}') WHERE meta_key LIKE '{old}%';"
    )
}

impl DbPrefixOptions {
    pub fn new(old_prefix: impl Into<String>, new_prefix: impl Into<String>) -> Self {
        Self {
            old_prefix: old_prefix.into(),
            new_prefix: new_prefix.into(),
            ..Self::default()
        }
    }

    pub fn with_woocommerce(mut self, enabled: bool) -> Self {
        self.woocommerce = enabled;
        self
    }

    pub fn with_sites(mut self, site_ids: Vec<u32>) -> Self {
        self.multisite = true;
        self.site_ids = site_ids;
        self
    }

    /// Generate the rename script, one statement per line.
    pub fn generate(&self) -> Result<String> {
        let old = normalize_prefix(&self.old_prefix);
        let new = normalize_prefix(&self.new_prefix);
        if old.is_empty() {
            bail!("please enter a valid old prefix");
        }
        if new.is_empty() {
            bail!("please enter a valid new prefix");
        }

        let mut lines = Vec::new();

        lines.extend(SITE_TABLES.iter().map(|t| rename(&old, &new, t)));
        lines.push(update_options(&format!("{new}options"), &old, &new));
        lines.push(rename(&old, &new, "usermeta"));
        lines.push(rename(&old, &new, "users"));
        lines.push(update_usermeta(&format!("{new}usermeta"), &old, &new));
        if self.woocommerce {
            lines.extend(WOOCOMMERCE_TABLES.iter().map(|t| rename(&old, &new, t)));
        }

        if self.multisite {
            for id in &self.site_ids {
                let old_site = format!("{old}{id}_");
                let new_site = format!("{new}{id}_");

                lines.extend(SITE_TABLES.iter().map(|t| rename(&old_site, &new_site, t)));
                lines.push(update_options(
                    &format!("{new_site}options"),
                    &old_site,
                    &new_site,
                ));
                // Users are shared across the network.
                lines.push(update_usermeta(
                    &format!("{new}usermeta"),
                    &old_site,
                    &new_site,
                ));
                if self.woocommerce {
                    lines.extend(
                        WOOCOMMERCE_TABLES
                            .iter()
                            .map(|t| rename(&old_site, &new_site, t)),
                    );
                }
            }
        }

        tracing::debug!(statements = lines.len(), "generated prefix rename sql");
        Ok(lines.join("\n"))
    }
}
