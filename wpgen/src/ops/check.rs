//! Check operation - manifest validation.

use std::path::Path;

use eyre::{Context, Result};
use wpgen_codegen::pipeline::{Pipeline, Severity};
use wpgen_manifest::Manifest;

use crate::reports::{CheckReport, EntitySummary};

/// Run the generation pipeline and collect its diagnostics.
pub fn check(manifest: &Manifest, config_path: &Path) -> Result<CheckReport> {
    let ctx = Pipeline::new()
        .run_config(&manifest.entity)
        .wrap_err("Validation failed")?;

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &ctx.diagnostics {
        let msg = match &diag.location {
            Some(loc) => format!("{}\n  --> {}", diag.message, loc),
            None => diag.message.clone(),
        };

        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    let d = &ctx.descriptor;
    let summary = EntitySummary {
        entity: d.entity_slug(),
        table: d.table.clone(),
        version: d.version.clone(),
        columns: ctx
            .allowed
            .as_ref()
            .map(|allowed| allowed.to_vec())
            .unwrap_or_default(),
        repository: d.generate_repository,
        rest: d.generate_rest_controller.then(|| d.rest_namespace.clone()),
    };

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        errors,
        warnings,
        infos,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_reports_warnings_and_summary() {
        let manifest: Manifest = r#"
            [entity]
            name = "ticket"
            namespace = "support/v1"

            [[entity.columns]]
            name = "id"

            [[entity.columns]]
            name = "subject"
        "#
        .parse()
        .unwrap();

        let report = check(&manifest, Path::new("wpgen.toml")).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].ends_with("--> entity.columns[0]"));
        assert_eq!(report.summary.table, "tfd_tickets");
        assert_eq!(
            report.summary.columns,
            ["id", "subject", "created_at", "updated_at"]
        );
        assert_eq!(report.summary.rest.as_deref(), Some("support/v1"));
    }
}
