//! Domain migration SQL.

use eyre::{Result, bail};
use wpgen_core::escape_sql_string;

use super::prefix_or_default;

/// Options for the `migration-sql` tool.
#[derive(Debug, Clone, Default)]
pub struct MigrationOptions {
    pub from_url: String,
    pub to_url: String,
    /// Table prefix; blank means `wp_`.
    pub prefix: String,
}

/// Remove all whitespace and trailing slashes from a URL.
pub fn normalize_url(url: &str) -> String {
    let compact: String = url.chars().filter(|c| !c.is_whitespace()).collect();
    compact.trim_end_matches('/').to_string()
}

fn checked_url(url: &str, label: &str) -> Result<String> {
    let url = normalize_url(url);
    // A bare scheme is left as `http:` once trailing slashes are trimmed.
    if matches!(url.as_str(), "" | "http:" | "https:") {
        bail!("please enter a valid \"{}\" domain", label);
    }
    Ok(url)
}

impl MigrationOptions {
    pub fn new(from_url: impl Into<String>, to_url: impl Into<String>) -> Self {
        Self {
            from_url: from_url.into(),
            to_url: to_url.into(),
            prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Generate the `UPDATE ... REPLACE(...)` statements.
    pub fn generate(&self) -> Result<String> {
        let from = escape_sql_string(&checked_url(&self.from_url, "From")?);
        let to = escape_sql_string(&checked_url(&self.to_url, "To")?);
        let p = prefix_or_default(&self.prefix);

        let replace = |column: &str| format!("{c} = REPLACE({c}, '{}', '{}')", from, to, c = column);

        let statements = [
            format!(
                "UPDATE {}options\nSET {}\nWHERE option_name = 'home' OR option_name = 'siteurl';",
                p,
                replace("option_value")
            ),
            format!("UPDATE {}posts\nSET {};", p, replace("post_content")),
            format!("UPDATE {}posts\nSET {};", p, replace("post_excerpt")),
            format!("UPDATE {}postmeta\nSET {};", p, replace("meta_value")),
            format!("UPDATE {}termmeta\nSET {};", p, replace("meta_value")),
            format!("UPDATE {}comments\nSET {};", p, replace("comment_content")),
            format!("UPDATE {}comments\nSET {};", p, replace("comment_author_url")),
            format!(
                "UPDATE {}posts\nSET {}\nWHERE post_type = 'attachment';",
                p,
                replace("guid")
            ),
        ];

        tracing::debug!(prefix = %p, "generated migration sql");
        Ok(format!("{}\n", statements.join("\n\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url(" https://old.example.com/// "), "https://old.example.com");
        assert_eq!(normalize_url("https://a b.com"), "https://ab.com");
    }

    #[test]
    fn test_generate() {
        let sql = MigrationOptions::new("https://old.test/", "https://new.test")
            .with_prefix("shop")
            .generate()
            .unwrap();

        assert!(sql.starts_with(
            "UPDATE shop_options\nSET option_value = REPLACE(option_value, 'https://old.test', 'https://new.test')\nWHERE option_name = 'home' OR option_name = 'siteurl';\n\n"
        ));
        assert_eq!(sql.matches("UPDATE ").count(), 8);
        assert!(sql.ends_with("WHERE post_type = 'attachment';\n"));
    }

    #[test]
    fn test_default_prefix_and_quote_escaping() {
        let sql = MigrationOptions::new("https://o'brien.test", "https://new.test")
            .generate()
            .unwrap();
        assert!(sql.contains("UPDATE wp_postmeta\n"));
        assert!(sql.contains("'https://o''brien.test'"));
    }

    #[test]
    fn test_rejects_bare_scheme() {
        let err = MigrationOptions::new("https://", "https://new.test")
            .generate()
            .unwrap_err();
        assert!(err.to_string().contains("\"From\""));

        let err = MigrationOptions::new("https://old.test", "  ")
            .generate()
            .unwrap_err();
        assert!(err.to_string().contains("\"To\""));

        for bare in ["http://", " http:/// ", "https:"] {
            let result = MigrationOptions::new(bare, "https://new.test").generate();
            assert!(result.is_err(), "{bare:?} should be rejected");
        }
    }
}
