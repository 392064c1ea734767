//! Diagnostics collected while generating a plugin.

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The output cannot be trusted.
    Error,
    /// Input was adjusted or ignored; the output is still usable.
    Warning,
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A message produced by a generation phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Name of the phase that produced it.
    pub phase: String,
    pub message: String,
    /// Manifest location, e.g. `entity.columns[2]`.
    pub location: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase: phase.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, phase, message)
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    /// Attach a manifest location.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_location() {
        let diag = Diagnostic::warning("normalize", "column row 2 was skipped")
            .at("entity.columns[1]");
        assert_eq!(
            diag.to_string(),
            "warning: column row 2 was skipped (at entity.columns[1])"
        );
    }

    #[test]
    fn test_severity_predicates() {
        assert!(Diagnostic::error("render", "x").severity.is_error());
        assert!(!Diagnostic::info("render", "x").severity.is_warning());
        assert_eq!(Severity::Info.to_string(), "info");
    }

    #[test]
    fn test_serializes_lowercase_severity() {
        let json = serde_json::to_string(&Diagnostic::info("ddl", "ok")).unwrap();
        assert_eq!(
            json,
            r#"{"severity":"info","phase":"ddl","message":"ok","location":null}"#
        );
    }
}
