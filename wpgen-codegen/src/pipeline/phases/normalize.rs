//! Normalize phase: read the column table and apply entity defaults.

use eyre::Result;
use indexmap::IndexMap;
use wpgen_core::to_slug;

use crate::{
    crud::{DEFAULT_ENTITY, read_column_table},
    pipeline::{Diagnostic, GenerationContext, Phase},
};

/// Turns raw column rows into [`ColumnSpec`](crate::crud::ColumnSpec)s.
///
/// Dropped rows and repeated names are reported as warnings.
pub struct NormalizePhase;

const PHASE: &str = "normalize";

impl Phase for NormalizePhase {
    fn name(&self) -> &'static str {
        PHASE
    }

    fn description(&self) -> &'static str {
        "Normalize column rows and fill entity defaults"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        if !ctx.raw_columns.is_empty() {
            let table = read_column_table(&ctx.raw_columns);
            for dropped in &table.dropped {
                tracing::warn!(row = dropped.row(), "{}", dropped.message());
                ctx.add_diagnostic(
                    Diagnostic::warning(PHASE, dropped.message())
                        .at(format!("entity.columns[{}]", dropped.row() - 1)),
                );
            }
            ctx.descriptor.columns = table.columns;
        }

        let entity = ctx.descriptor.entity.trim().to_string();
        if !entity.is_empty() && to_slug(&entity).is_empty() {
            ctx.add_diagnostic(
                Diagnostic::warning(
                    PHASE,
                    format!(
                        "entity name '{}' has no usable characters, using '{}'",
                        entity, DEFAULT_ENTITY
                    ),
                )
                .at("entity.name"),
            );
        }

        let mut seen: IndexMap<&str, usize> = IndexMap::new();
        for column in &ctx.descriptor.columns {
            *seen.entry(column.name.as_str()).or_default() += 1;
        }
        let repeated: Vec<Diagnostic> = seen
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(name, count)| {
                Diagnostic::warning(
                    PHASE,
                    format!("column '{}' is defined {} times", name, count),
                )
                .at("entity.columns")
            })
            .collect();
        ctx.diagnostics.extend(repeated);

        ctx.descriptor = ctx.descriptor.clone().effective();
        tracing::debug!(
            entity = %ctx.descriptor.entity,
            table = %ctx.descriptor.table,
            columns = ctx.descriptor.columns.len(),
            "normalized entity"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crud::{ColumnSpec, EntityDescriptor, RawColumn};

    #[test]
    fn test_reports_dropped_rows() {
        let mut ctx = GenerationContext::new(
            EntityDescriptor::new("ticket"),
            vec![
                RawColumn::new("id", "INT"),
                RawColumn::new("title", ""),
                RawColumn::new("", "INT"),
            ],
        );

        NormalizePhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.descriptor.columns.len(), 1);
        assert_eq!(ctx.warning_count(), 2);
        assert_eq!(
            ctx.diagnostics[0].location.as_deref(),
            Some("entity.columns[0]")
        );
        assert!(ctx.diagnostics[0].message.contains("reserved primary key"));
        assert_eq!(
            ctx.diagnostics[1].location.as_deref(),
            Some("entity.columns[2]")
        );
    }

    #[test]
    fn test_reports_repeated_names() {
        let mut ctx = GenerationContext::new(
            EntityDescriptor::new("ticket"),
            vec![
                RawColumn::new("Status", "INT"),
                RawColumn::new("status", "INT"),
            ],
        );

        NormalizePhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.descriptor.columns.len(), 2);
        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(ctx.diagnostics[0].message, "column 'status' is defined 2 times");
    }

    #[test]
    fn test_keeps_prebuilt_columns_without_rows() {
        let descriptor =
            EntityDescriptor::new("ticket").with_column(ColumnSpec::new("title", "TEXT"));
        let mut ctx = GenerationContext::new(descriptor, Vec::new());

        NormalizePhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.descriptor.columns.len(), 1);
        assert_eq!(ctx.descriptor.table, "tfd_tickets");
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_warns_on_unusable_entity_name() {
        let mut ctx = GenerationContext::new(EntityDescriptor::new("!!!"), Vec::new());

        NormalizePhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.descriptor.entity_slug(), "item");
        assert_eq!(ctx.diagnostics[0].location.as_deref(), Some("entity.name"));
    }
}
