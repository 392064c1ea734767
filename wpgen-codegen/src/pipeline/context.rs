//! State carried through the generation phases.

use wpgen_manifest::EntityConfig;

use super::diagnostic::Diagnostic;
use crate::crud::{AllowedColumnSet, EntityDescriptor, RawColumn};

/// Context passed through all generation phases.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Entity settings; columns are filled by the normalize phase when
    /// `raw_columns` is non-empty.
    pub descriptor: EntityDescriptor,
    /// The column table as entered, one entry per row.
    pub raw_columns: Vec<RawColumn>,
    /// `CREATE TABLE` column lines (set by the ddl phase).
    pub column_lines: Option<Vec<String>>,
    /// Writable columns (set by the allow-list phase).
    pub allowed: Option<AllowedColumnSet>,
    /// The rendered plugin file (set by the render phase).
    pub output: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationContext {
    pub fn new(descriptor: EntityDescriptor, raw_columns: Vec<RawColumn>) -> Self {
        Self {
            descriptor,
            raw_columns,
            column_lines: None,
            allowed: None,
            output: None,
            diagnostics: Vec::new(),
        }
    }

    /// Start from a manifest entity, keeping its column rows unprocessed.
    pub fn from_config(config: &EntityConfig) -> Self {
        let descriptor = EntityDescriptor {
            columns: Vec::new(),
            ..EntityDescriptor::from_config(config)
        };
        let rows = config.columns.iter().map(RawColumn::from).collect();
        Self::new(descriptor, rows)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_keeps_rows_raw() {
        let manifest: wpgen_manifest::Manifest = r#"
            [entity]
            name = "ticket"
            rest = false

            [[entity.columns]]
            name = "ID"

            [[entity.columns]]
            name = "Title"
        "#
        .parse()
        .unwrap();

        let ctx = GenerationContext::from_config(&manifest.entity);

        assert_eq!(ctx.raw_columns.len(), 2);
        assert!(ctx.descriptor.columns.is_empty());
        assert!(!ctx.descriptor.generate_rest_controller);
        assert!(ctx.output.is_none());
    }

    #[test]
    fn test_counts() {
        let mut ctx = GenerationContext::new(EntityDescriptor::new("ticket"), Vec::new());
        ctx.add_diagnostic(Diagnostic::warning("normalize", "a"));
        ctx.add_diagnostic(Diagnostic::info("normalize", "b"));

        assert!(!ctx.has_errors());
        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(ctx.error_count(), 0);
        assert_eq!(ctx.warnings().count(), 1);
    }
}
