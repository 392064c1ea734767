//! WooCommerce product purge SQL.

use super::prefix_or_default;
use crate::builder::CodeBuilder;

/// Lookup tables cleared after the products are gone.
const LOOKUP_TABLES: [&str; 6] = [
    "wc_product_meta_lookup",
    "wc_product_attributes_lookup",
    "wc_category_lookup",
    "wc_download_log",
    "wc_rate_limits",
    "wc_reserved_stock",
];

const PRODUCT_TYPES: &str = "('product','product_variation')";

/// Options for the `delete-products` tool.
#[derive(Debug, Clone, Default)]
pub struct DeleteProductsOptions {
    /// Table prefix; blank means `wp_`.
    pub prefix: String,
    /// Clear lookup tables with `TRUNCATE TABLE` instead of `DELETE FROM`.
    pub truncate: bool,
}

impl DeleteProductsOptions {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            truncate: false,
        }
    }

    pub fn with_truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Generate the transaction script.
    pub fn generate(&self) -> String {
        let p = prefix_or_default(&self.prefix);
        let mut b = CodeBuilder::sql();

        b.push_line("-- =========================================");
        b.push_line("-- WooCommerce: Delete ALL products + variations");
        b.push_line(&format!("-- Prefix: {}", p));
        b.push_line("-- WARNING: destructive operation. Backup first.");
        b.push_line("-- =========================================");
        b.push_blank();
        b.push_line("START TRANSACTION;");
        b.push_blank();

        b.push_line("-- Remove term relationships for products/variations");
        b.push_line(&format!("DELETE tr FROM {}term_relationships tr", p));
        b.push_line(&format!("INNER JOIN {}posts p2 ON p2.ID = tr.object_id", p));
        b.push_line(&format!("WHERE p2.post_type IN {};", PRODUCT_TYPES));
        b.push_blank();

        b.push_line("-- Remove postmeta for products/variations");
        b.push_line(&format!("DELETE pm FROM {}postmeta pm", p));
        b.push_line(&format!("INNER JOIN {}posts p2 ON p2.ID = pm.post_id", p));
        b.push_line(&format!("WHERE p2.post_type IN {};", PRODUCT_TYPES));
        b.push_blank();

        b.push_line("-- Remove attachments whose parent is a product/variation (optional)");
        b.push_line(&format!("DELETE a FROM {}posts a", p));
        b.push_line(&format!(
            "INNER JOIN {}posts parent ON parent.ID = a.post_parent",
            p
        ));
        b.push_line("WHERE a.post_type = 'attachment'");
        b.push_indent();
        b.push_line(&format!("AND parent.post_type IN {};", PRODUCT_TYPES));
        b.push_dedent();
        b.push_blank();

        b.push_line("-- Delete products and variations");
        b.push_line(&format!("DELETE FROM {}posts", p));
        b.push_line(&format!("WHERE post_type IN {};", PRODUCT_TYPES));
        b.push_blank();

        let (label, statement) = if self.truncate {
            ("TRUNCATE", "TRUNCATE TABLE")
        } else {
            ("DELETE", "DELETE FROM")
        };
        b.push_line(&format!("-- Clear WooCommerce lookup tables ({})", label));
        for table in LOOKUP_TABLES {
            b.push_line(&format!("{} {}{};", statement, p, table));
        }
        b.push_blank();
        b.push_line("COMMIT;");

        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_wraps_statements() {
        let sql = DeleteProductsOptions::default().generate();
        assert!(sql.contains("-- Prefix: wp_\n"));
        assert!(sql.contains("START TRANSACTION;\n"));
        assert!(sql.ends_with("\nCOMMIT;\n"));
        assert!(sql.contains(
            "WHERE a.post_type = 'attachment'\n  AND parent.post_type IN ('product','product_variation');\n"
        ));
    }

    #[test]
    fn test_lookup_tables_delete_by_default() {
        let sql = DeleteProductsOptions::new("shop").generate();
        assert!(sql.contains("DELETE FROM shop_wc_product_meta_lookup;\n"));
        assert!(!sql.contains("TRUNCATE"));
    }

    #[test]
    fn test_lookup_tables_truncate() {
        let sql = DeleteProductsOptions::new("shop_").with_truncate(true).generate();
        assert_eq!(sql.matches("TRUNCATE TABLE shop_").count(), 6);
        assert!(sql.contains("-- Clear WooCommerce lookup tables (TRUNCATE)\n"));
    }
}
