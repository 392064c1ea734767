//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// What would be generated for the entity.
#[derive(Debug)]
pub struct EntitySummary {
    pub entity: String,
    pub table: String,
    pub version: String,
    /// Writable columns, `id` first.
    pub columns: Vec<String>,
    pub repository: bool,
    /// REST namespace when routes are generated.
    pub rest: Option<String>,
}

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    pub config_path: PathBuf,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub summary: EntitySummary,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.diagnostic("error", error);
        }
        for warning in &self.warnings {
            out.diagnostic("warning", warning);
        }
        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }
        if !self.is_valid() {
            return;
        }

        let s = &self.summary;
        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.key_value("entity", &s.entity);
        out.key_value("table", &s.table);
        out.key_value("version", &s.version);
        out.key_value(
            "repository",
            if s.repository { "yes" } else { "no" },
        );
        out.key_value("rest", s.rest.as_deref().unwrap_or("disabled"));
        out.preformatted(&format!("  columns ({}):", s.columns.len()));
        for column in &s.columns {
            out.list_item(column);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Output for Recorder {
        fn key_value(&mut self, key: &str, value: &str) {
            self.0.push(format!("{}={}", key, value));
        }

        fn list_item(&mut self, text: &str) {
            self.0.push(format!("- {}", text));
        }

        fn diagnostic(&mut self, level: &str, msg: &str) {
            self.0.push(format!("{}: {}", level, msg));
        }

        fn preformatted(&mut self, text: &str) {
            self.0.push(text.to_string());
        }

        fn newline(&mut self) {
            self.0.push(String::new());
        }
    }

    fn report(errors: Vec<String>) -> CheckReport {
        CheckReport {
            config_path: PathBuf::from("wpgen.toml"),
            errors,
            warnings: vec!["column row 1 was skipped".to_string()],
            infos: Vec::new(),
            summary: EntitySummary {
                entity: "ticket".to_string(),
                table: "tfd_tickets".to_string(),
                version: "1.0.0".to_string(),
                columns: vec!["id".to_string()],
                repository: true,
                rest: None,
            },
        }
    }

    #[test]
    fn test_valid_report_lists_summary() {
        let mut out = Recorder::default();
        report(Vec::new()).render(&mut out);

        assert_eq!(out.0[0], "warning: column row 1 was skipped");
        assert!(out.0.contains(&"✓ wpgen.toml is valid".to_string()));
        assert!(out.0.contains(&"rest=disabled".to_string()));
        assert_eq!(out.0.last().map(String::as_str), Some("- id"));
    }

    #[test]
    fn test_invalid_report_stops_after_diagnostics() {
        let mut out = Recorder::default();
        report(vec!["boom".to_string()]).render(&mut out);

        assert_eq!(out.0[0], "error: boom");
        assert!(!out.0.iter().any(|l| l.contains("is valid")));
    }
}
