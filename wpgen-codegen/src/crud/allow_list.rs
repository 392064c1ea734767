//! The column allow-list enforced by generated write operations.

use indexmap::IndexSet;
use wpgen_core::to_slug;

use super::{ColumnSpec, column::PRIMARY_KEY};

/// Ordered, de-duplicated set of column names a generated repository accepts.
///
/// Always starts with `id`, followed by user columns in table order, then
/// `created_at` / `updated_at` when timestamps are enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedColumnSet {
    names: IndexSet<String>,
}

impl AllowedColumnSet {
    pub fn build(columns: &[ColumnSpec], add_timestamps: bool) -> Self {
        let mut names = IndexSet::new();
        names.insert(PRIMARY_KEY.to_string());

        for column in columns {
            let name = to_slug(&column.name);
            if name.is_empty() || name == PRIMARY_KEY {
                continue;
            }
            names.insert(name);
        }

        if add_timestamps {
            names.insert("created_at".to_string());
            names.insert("updated_at".to_string());
        }

        Self { names }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}
