//! The entity descriptor driving CRUD plugin generation.

use wpgen_core::to_slug;
use wpgen_manifest::EntityConfig;

use super::{
    ColumnSpec,
    column::{RawColumn, read_columns},
};

pub const DEFAULT_ENTITY: &str = "item";
pub const DEFAULT_REST_NAMESPACE: &str = "tfd-dbcrud/v1";
pub const DEFAULT_WRITE_CAPABILITY: &str = "manage_options";
pub const DEFAULT_OPTION_KEY: &str = "tfd_dbcrud_version";
pub const DEFAULT_VERSION_CONSTANT: &str = "TFD_DBCRUD_VERSION";
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Everything the CRUD renderer needs to know about one entity.
///
/// Built fresh for each generation. Call [`EntityDescriptor::effective`] to
/// fill blank fields with defaults and apply the REST → repository rule;
/// the renderer does this itself, so callers may pass raw values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub entity: String,
    pub table: String,
    pub rest_namespace: String,
    pub write_capability: String,
    pub option_key: String,
    pub version_constant: String,
    /// Emitted verbatim; PHP's `version_compare` does the ordering.
    pub version: String,
    /// Table order; insertion order is the DDL column order.
    pub columns: Vec<ColumnSpec>,
    pub add_timestamps: bool,
    pub use_charset_collate: bool,
    pub generate_repository: bool,
    pub generate_rest_controller: bool,
}

impl Default for EntityDescriptor {
    fn default() -> Self {
        Self {
            entity: String::new(),
            table: String::new(),
            rest_namespace: String::new(),
            write_capability: String::new(),
            option_key: String::new(),
            version_constant: String::new(),
            version: String::new(),
            columns: Vec::new(),
            add_timestamps: true,
            use_charset_collate: true,
            generate_repository: true,
            generate_rest_controller: true,
        }
    }
}

impl EntityDescriptor {
    /// Create a descriptor for `entity` with default settings.
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            ..Self::default()
        }
    }

    /// Build a descriptor from a parsed manifest entity.
    pub fn from_config(config: &EntityConfig) -> Self {
        let rows: Vec<RawColumn> = config.columns.iter().map(RawColumn::from).collect();

        Self {
            entity: config.name.clone(),
            table: config.table.clone(),
            rest_namespace: config.namespace.clone(),
            write_capability: config.capability.clone(),
            option_key: config.option_key.clone(),
            version_constant: config.version_constant.clone(),
            version: config.version.clone(),
            columns: read_columns(&rows),
            add_timestamps: config.timestamps,
            use_charset_collate: config.charset_collate,
            generate_repository: config.repository,
            generate_rest_controller: config.rest,
        }
        .effective()
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.add_timestamps = enabled;
        self
    }

    pub fn with_repository(mut self, enabled: bool) -> Self {
        self.generate_repository = enabled;
        self
    }

    pub fn with_rest(mut self, enabled: bool) -> Self {
        self.generate_rest_controller = enabled;
        self
    }

    /// The entity slug used for the REST base and PHP identifiers.
    pub fn entity_slug(&self) -> String {
        let slug = to_slug(&self.entity);
        if slug.is_empty() {
            DEFAULT_ENTITY.to_string()
        } else {
            slug
        }
    }

    /// Fill blank fields with defaults and enforce cross-field rules.
    ///
    /// - blank entity → `item`
    /// - table is slugged; blank → `tfd_<entity>s`
    /// - REST routes force the repository on
    pub fn effective(mut self) -> Self {
        fn or_default(value: &str, default: &str) -> String {
            let value = value.trim();
            if value.is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        }

        self.entity = or_default(&self.entity, DEFAULT_ENTITY);
        let table = to_slug(&self.table);
        self.table = if table.is_empty() {
            format!("tfd_{}s", self.entity_slug())
        } else {
            table
        };
        self.rest_namespace = or_default(&self.rest_namespace, DEFAULT_REST_NAMESPACE);
        self.write_capability = or_default(&self.write_capability, DEFAULT_WRITE_CAPABILITY);
        self.option_key = or_default(&self.option_key, DEFAULT_OPTION_KEY);
        self.version_constant = or_default(&self.version_constant, DEFAULT_VERSION_CONSTANT);
        self.version = or_default(&self.version, DEFAULT_VERSION);

        if self.generate_rest_controller {
            self.generate_repository = true;
        }
        self
    }
}
