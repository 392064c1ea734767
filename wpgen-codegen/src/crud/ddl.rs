//! `CREATE TABLE` column definition lines.

use wpgen_core::to_slug;

use super::{ColumnSpec, column::PRIMARY_KEY};

/// Fixed primary key definition; always the first line.
pub const PRIMARY_KEY_LINE: &str = "`id` BIGINT(20) UNSIGNED NOT NULL AUTO_INCREMENT";
pub const CREATED_AT_LINE: &str = "`created_at` DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP";
pub const UPDATED_AT_LINE: &str = "`updated_at` DATETIME NULL DEFAULT NULL";

/// Build the column definitions for the entity table, in input order.
///
/// Columns whose name still normalizes to empty or `id` are skipped, so a
/// hand-built [`ColumnSpec`] can never produce a second primary key line.
pub fn column_lines(columns: &[ColumnSpec], add_timestamps: bool) -> Vec<String> {
    let mut lines = vec![PRIMARY_KEY_LINE.to_string()];

    for column in columns {
        let name = to_slug(&column.name);
        if name.is_empty() || name == PRIMARY_KEY {
            continue;
        }
        if name == column.name {
            lines.push(column.definition());
        } else {
            let normalized = ColumnSpec {
                name,
                ..column.clone()
            };
            lines.push(normalized.definition());
        }
    }

    if add_timestamps {
        lines.push(CREATED_AT_LINE.to_string());
        lines.push(UPDATED_AT_LINE.to_string());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str) -> ColumnSpec {
        ColumnSpec::new(name, "INT")
    }

    #[test]
    fn test_primary_key_always_first() {
        assert_eq!(column_lines(&[], false), [PRIMARY_KEY_LINE]);
        assert_eq!(column_lines(&[col("b"), col("a")], true)[0], PRIMARY_KEY_LINE);
    }

    #[test]
    fn test_order_is_preserved() {
        let lines = column_lines(&[col("zeta"), col("alpha"), col("mid")], false);
        assert_eq!(
            lines,
            [
                PRIMARY_KEY_LINE,
                "`zeta` INT NOT NULL",
                "`alpha` INT NOT NULL",
                "`mid` INT NOT NULL",
            ]
        );
    }

    #[test]
    fn test_residual_id_is_skipped() {
        let lines = column_lines(&[col("id"), col("ID "), col("title")], false);
        assert_eq!(lines, [PRIMARY_KEY_LINE, "`title` INT NOT NULL"]);
        assert_eq!(lines.iter().filter(|l| l.starts_with("`id`")).count(), 1);
    }

    #[test]
    fn test_unnormalized_names_are_normalized() {
        let lines = column_lines(&[col("Due Date")], false);
        assert_eq!(lines[1], "`due_date` INT NOT NULL");
    }

    #[test]
    fn test_timestamps_appended_last() {
        let lines = column_lines(&[col("a")], true);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], CREATED_AT_LINE);
        assert_eq!(lines[3], UPDATED_AT_LINE);
    }
}
