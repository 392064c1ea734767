//! Column table reading and per-column SQL rendering.

use wpgen_core::{escape_sql_string, is_numeric_literal, to_slug};
use wpgen_manifest::ColumnRow;

/// The reserved primary key column. Always generated, never user-defined.
pub const PRIMARY_KEY: &str = "id";

/// SQL type used when a row leaves the type blank.
pub const DEFAULT_SQL_TYPE: &str = "VARCHAR(255)";

/// One editable row of the column table, as raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawColumn {
    pub name: String,
    pub sql_type: String,
    /// `"YES"` marks the column nullable; anything else does not.
    pub null: String,
    pub default: String,
    pub extra: String,
}

impl RawColumn {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            ..Self::default()
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.null = if nullable { "YES" } else { "NO" }.to_string();
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }
}

impl From<&ColumnRow> for RawColumn {
    fn from(row: &ColumnRow) -> Self {
        Self {
            name: row.name.clone(),
            sql_type: row.sql_type.clone(),
            null: row.null_value().to_string(),
            default: row.default.clone(),
            extra: row.extra.clone(),
        }
    }
}

/// A normalized user column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Lowercase `[a-z0-9_]` identifier; never empty, never `id`.
    pub name: String,
    /// `None` renders as [`DEFAULT_SQL_TYPE`].
    pub sql_type: Option<String>,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub extra: Option<String>,
}

impl ColumnSpec {
    /// Create a `NOT NULL` column with no default or extra.
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: Some(sql_type.into()),
            nullable: false,
            default_value: None,
            extra: None,
        }
    }

    /// The SQL type, falling back to [`DEFAULT_SQL_TYPE`].
    pub fn sql_type(&self) -> &str {
        self.sql_type.as_deref().unwrap_or(DEFAULT_SQL_TYPE)
    }

    /// Classify the default value for rendering.
    pub fn default_kind(&self) -> Option<DefaultValue<'_>> {
        self.default_value.as_deref().map(DefaultValue::classify)
    }

    /// The `` `name` TYPE NULLABILITY[ DEFAULT ...][ EXTRA]`` definition line.
    pub fn definition(&self) -> String {
        let nullability = if self.nullable { "NULL" } else { "NOT NULL" };
        let default = self
            .default_kind()
            .map(|d| d.to_clause())
            .unwrap_or_default();
        let extra = self
            .extra
            .as_deref()
            .map(|e| format!(" {}", e))
            .unwrap_or_default();

        format!(
            "`{}` {} {}{}{}",
            self.name,
            self.sql_type(),
            nullability,
            default,
            extra
        )
        .trim()
        .to_string()
    }
}

/// How a column default must be written in SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue<'a> {
    /// `NULL`, in any case.
    Null,
    /// `CURRENT_TIMESTAMP...` or a numeric literal, written unquoted.
    Unquoted(&'a str),
    /// Anything else, written as a quoted string.
    Quoted(&'a str),
}

impl<'a> DefaultValue<'a> {
    pub fn classify(value: &'a str) -> Self {
        if value.eq_ignore_ascii_case("NULL") {
            Self::Null
        } else if starts_with_ignore_case(value, "CURRENT_TIMESTAMP") || is_numeric_literal(value)
        {
            Self::Unquoted(value)
        } else {
            Self::Quoted(value)
        }
    }

    /// The ` DEFAULT ...` clause, including its leading space.
    pub fn to_clause(self) -> String {
        match self {
            Self::Null => " DEFAULT NULL".to_string(),
            Self::Unquoted(v) => format!(" DEFAULT {}", v),
            Self::Quoted(v) => format!(" DEFAULT '{}'", escape_sql_string(v)),
        }
    }
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Why a row was left out of the effective column set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DroppedColumn {
    /// The name normalized to nothing.
    EmptyName { row: usize, raw: String },
    /// The name normalized to the reserved primary key.
    ReservedPrimaryKey { row: usize, raw: String },
}

impl DroppedColumn {
    /// One-based row number in the column table.
    pub fn row(&self) -> usize {
        match self {
            Self::EmptyName { row, .. } | Self::ReservedPrimaryKey { row, .. } => *row,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::EmptyName { row, raw } if raw.trim().is_empty() => {
                format!("column row {} has no name and was skipped", row)
            }
            Self::EmptyName { row, raw } => format!(
                "column row {} name '{}' has no usable characters and was skipped",
                row, raw
            ),
            Self::ReservedPrimaryKey { row, raw } => format!(
                "column row {} '{}' is the reserved primary key and was skipped",
                row, raw
            ),
        }
    }
}

/// Columns read from the table plus the rows that were filtered out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnTable {
    pub columns: Vec<ColumnSpec>,
    pub dropped: Vec<DroppedColumn>,
}

/// Read raw rows into normalized columns, dropping empty and `id` names.
pub fn read_columns(rows: &[RawColumn]) -> Vec<ColumnSpec> {
    read_column_table(rows).columns
}

/// Like [`read_columns`], but also reports which rows were dropped and why.
pub fn read_column_table(rows: &[RawColumn]) -> ColumnTable {
    let mut table = ColumnTable::default();

    for (index, raw) in rows.iter().enumerate() {
        let row = index + 1;
        let name = to_slug(&raw.name);

        if name.is_empty() {
            table.dropped.push(DroppedColumn::EmptyName {
                row,
                raw: raw.name.clone(),
            });
            continue;
        }
        if name == PRIMARY_KEY {
            table.dropped.push(DroppedColumn::ReservedPrimaryKey {
                row,
                raw: raw.name.clone(),
            });
            continue;
        }

        table.columns.push(ColumnSpec {
            name,
            sql_type: non_empty(&raw.sql_type),
            nullable: raw.null.trim() == "YES",
            default_value: non_empty(&raw.default),
            extra: non_empty(&raw.extra),
        });
    }

    table
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
