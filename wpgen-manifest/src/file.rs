use std::path::{Path, PathBuf};

use crate::{Error, Manifest, Result};

/// A wpgen.toml file with both raw content and parsed manifest.
pub struct WpgenToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl WpgenToml {
    /// Open and parse a wpgen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

/// Render a starter manifest for `entity`, seeded with `title` and `status` columns.
pub fn starter_manifest(entity: &str) -> String {
    let entity = entity.trim();
    let entity = if entity.is_empty() { "item" } else { entity };
    let slug = wpgen_core::to_slug(entity);
    let slug = if slug.is_empty() { "item" } else { slug.as_str() };

    format!(
        r#"[entity]
name = "{slug}"
table = "my_plugin_{slug}s"
namespace = "my-plugin/v1"
capability = "manage_options"
option_key = "my_plugin_{slug}s_db_version"
version_constant = "MY_PLUGIN_VERSION"
version = "1.0.0"
timestamps = true
charset_collate = true
repository = true
rest = true

[[entity.columns]]
name = "title"
type = "VARCHAR(255)"
null = "NO"

[[entity.columns]]
name = "status"
type = "VARCHAR(50)"
null = "NO"
default = "pending"
"#
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_starter_manifest_parses() {
        let manifest: Manifest = starter_manifest("Support Ticket").parse().unwrap();
        let entity = &manifest.entity;

        assert_eq!(entity.name, "support_ticket");
        assert_eq!(entity.table, "my_plugin_support_tickets");
        let names: Vec<_> = entity.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["title", "status"]);
        assert_eq!(entity.columns[1].default, "pending");
    }

    #[test]
    fn test_starter_manifest_blank_entity() {
        let manifest: Manifest = starter_manifest("  ").parse().unwrap();
        assert_eq!(manifest.entity.name, "item");
    }

    #[test]
    fn test_open_reads_and_parses() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wpgen.toml");
        fs::write(&path, starter_manifest("ticket")).unwrap();

        let file = WpgenToml::open(&path).unwrap();

        assert_eq!(file.path(), path.as_path());
        assert!(file.content().contains("[[entity.columns]]"));
        assert_eq!(file.manifest().entity.name, "ticket");
    }
}
