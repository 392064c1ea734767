//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use miette::SourceSpan;
use wpgen_core::is_php_identifier;

use crate::{Error, Manifest, Result, error::SourceContext};

/// Default filename used in diagnostics when parsing from a string.
pub const DEFAULT_FILENAME: &str = "wpgen.toml";

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, DEFAULT_FILENAME)
    }
}

impl Manifest {
    /// Parse a wpgen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a wpgen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    validate_manifest(&manifest, &ctx)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    let entity = &manifest.entity;

    for (index, row) in entity.columns.iter().enumerate() {
        let Some(null) = &row.null else { continue };
        let value = row.null_value();
        if !matches!(value, "" | "YES" | "NO") {
            let column = if row.name.trim().is_empty() {
                format!("#{}", index + 1)
            } else {
                row.name.trim().to_string()
            };
            return Err(ctx.invalid_nullability_error(column, value, null.span().into()));
        }
    }

    let constant = entity.version_constant.trim();
    if !constant.is_empty() && !is_php_identifier(constant) {
        return Err(ctx.validation_error(
            format!("'{}' is not a valid PHP constant name", constant),
            find_value_span(ctx.src(), constant),
        ));
    }

    Ok(())
}

/// Locate a quoted string value in the manifest source.
fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{value}{quote}");
        if let Some(pos) = src.find(&pattern) {
            // +1 to skip the opening quote
            return Some(SourceSpan::from((pos + 1, value.len())));
        }
    }
    src.find(value)
        .map(|pos| SourceSpan::from((pos, value.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let manifest: Manifest = r#"
            [entity]
            name = "ticket"
            table = "my_plugin_tickets"
            namespace = "my-plugin/v1"
            version = "1.2.0"
            rest = false

            [[entity.columns]]
            name = "status"
            type = "VARCHAR(50)"
            null = "NO"
            default = "pending"
        "#
        .parse()
        .unwrap();

        let entity = &manifest.entity;
        assert_eq!(entity.name, "ticket");
        assert_eq!(entity.table, "my_plugin_tickets");
        assert_eq!(entity.version, "1.2.0");
        assert!(!entity.rest);
        assert!(entity.repository);
        assert!(entity.timestamps);
        assert_eq!(entity.columns.len(), 1);
        assert_eq!(entity.columns[0].sql_type, "VARCHAR(50)");
        assert!(!entity.columns[0].is_nullable());
    }

    #[test]
    fn test_empty_entity_uses_defaults() {
        let manifest: Manifest = "[entity]\n".parse().unwrap();
        assert!(manifest.entity.name.is_empty());
        assert!(manifest.entity.columns.is_empty());
        assert!(manifest.entity.charset_collate);
        assert!(manifest.entity.version.is_empty());
    }

    #[test]
    fn test_nullable_yes() {
        let manifest: Manifest = r#"
            [entity]
            [[entity.columns]]
            name = "notes"
            null = " YES "
        "#
        .parse()
        .unwrap();
        assert!(manifest.entity.columns[0].is_nullable());
    }

    #[test]
    fn test_invalid_nullability_has_span() {
        let src = r#"
            [entity]
            [[entity.columns]]
            name = "notes"
            null = "MAYBE"
        "#;
        let err = src.parse::<Manifest>().unwrap_err();
        match *err {
            Error::InvalidNullability {
                ref column,
                ref value,
                span,
                ..
            } => {
                assert_eq!(column, "notes");
                assert_eq!(value, "MAYBE");
                assert!(src[span.offset()..span.offset() + span.len()].contains("MAYBE"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_version_text_is_kept() {
        for version in ["1.0.0-beta", "01.02", "2024.1"] {
            let manifest: Manifest = format!("[entity]\nversion = \"{version}\"\n")
                .parse()
                .unwrap();
            assert_eq!(manifest.entity.version, version);
        }
    }

    #[test]
    fn test_non_string_version_is_parse_error() {
        let err = "[entity]\nversion = 2\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(*err, Error::Parse { span: Some(_), .. }));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = "[entity]\ncolour = \"blue\"\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_invalid_version_constant() {
        let src = "[entity]\nversion_constant = \"9LIVES\"\n";
        let err = src.parse::<Manifest>().unwrap_err();
        match *err {
            Error::Validation { span, ref message, .. } => {
                assert!(message.contains("9LIVES"));
                let span = span.expect("span should be found");
                assert_eq!(&src[span.offset()..span.offset() + span.len()], "9LIVES");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = Manifest::from_file("/definitely/not/here/wpgen.toml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
