//! Entity manifest types for wpgen.toml files.

use serde::Deserialize;
use toml::Spanned;

/// Root manifest for wpgen.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// The entity the CRUD plugin is generated for
    pub entity: EntityConfig,
}

/// Raw entity settings as written by the user.
///
/// Text fields are kept verbatim; empty values fall back to generator
/// defaults when the descriptor is built. Toggles default to enabled.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntityConfig {
    /// Entity name (e.g. "ticket")
    pub name: String,

    /// Table name without the `$wpdb->prefix`
    pub table: String,

    /// REST namespace (e.g. "my-plugin/v1")
    pub namespace: String,

    /// Capability required for write endpoints
    pub capability: String,

    /// Option storing the installed schema version
    pub option_key: String,

    /// Name of the PHP constant aliasing the plugin version
    pub version_constant: String,

    /// Plugin / schema version, kept verbatim; blank means `1.0.0`
    pub version: String,

    /// Add `created_at` / `updated_at` columns
    pub timestamps: bool,

    /// Append `$wpdb->get_charset_collate()` to the DDL
    pub charset_collate: bool,

    /// Generate the repository class
    pub repository: bool,

    /// Generate REST routes (implies `repository`)
    pub rest: bool,

    /// User-defined columns, in table order
    pub columns: Vec<ColumnRow>,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            table: String::new(),
            namespace: String::new(),
            capability: String::new(),
            option_key: String::new(),
            version_constant: String::new(),
            version: String::new(),
            timestamps: true,
            charset_collate: true,
            repository: true,
            rest: true,
            columns: Vec::new(),
        }
    }
}

/// One row of the column table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnRow {
    pub name: String,

    /// SQL type; empty means `VARCHAR(255)`
    #[serde(rename = "type")]
    pub sql_type: String,

    /// `"YES"` or `"NO"`
    pub null: Option<Spanned<String>>,

    pub default: String,

    pub extra: String,
}

impl ColumnRow {
    /// The nullability value with surrounding whitespace removed ("" when unset).
    pub fn null_value(&self) -> &str {
        self.null.as_ref().map(|n| n.get_ref().trim()).unwrap_or("")
    }

    /// Whether the column was marked nullable.
    pub fn is_nullable(&self) -> bool {
        self.null_value() == "YES"
    }
}
