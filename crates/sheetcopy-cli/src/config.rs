//! CLI configuration (`sheetcopy.toml`)
//!
//! ```toml
//! # Relative document paths are resolved against this directory
//! directory = "/data/excel"
//! # Copy shared-text indices as-is when a source has no shared string table
//! lenient_shared_text = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "sheetcopy.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base directory for relative document paths
    pub directory: Option<PathBuf>,
    /// Degrade a missing shared string table to raw indices during copy
    pub lenient_shared_text: bool,
}

impl Config {
    /// Load the configuration
    ///
    /// An explicit path must exist. Without one, `sheetcopy.toml` in the
    /// working directory is used if present, defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config '{}'", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve a document path against the configured directory
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.directory {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let config = Config::parse(
            r#"
directory = "/data/excel"
lenient_shared_text = true
"#,
        )
        .unwrap();
        assert_eq!(config.directory, Some(PathBuf::from("/data/excel")));
        assert!(config.lenient_shared_text);
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(Config::parse("directroy = \"/tmp\"").is_err());
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(dir.path().join("none.toml").as_path())).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "directory = \"files\"\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.directory, Some(PathBuf::from("files")));
    }

    #[test]
    fn test_resolve_path() {
        let config = Config {
            directory: Some(PathBuf::from("/data")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_path(Path::new("Hello.xlsx")),
            PathBuf::from("/data/Hello.xlsx")
        );
        assert_eq!(
            config.resolve_path(Path::new("/abs/Hello.xlsx")),
            PathBuf::from("/abs/Hello.xlsx")
        );
        assert_eq!(
            Config::default().resolve_path(Path::new("Hello.xlsx")),
            PathBuf::from("Hello.xlsx")
        );
    }
}
