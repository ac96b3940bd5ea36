//! TOML configuration.
//!
//! ```toml
//! [naming]
//! table_suffix = "_table"
//! db_suffix = ".db"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::naming::Naming;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub naming: Naming,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Like [`Config::from_file`], but any failure becomes [`Error::Config`]
    /// naming the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::from_file(path).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_naming_section() {
        let config = Config::parse("[naming]\ntable_suffix = \"_rows\"\n").unwrap();
        assert_eq!(config.naming.table_suffix, "_rows");
        assert_eq!(config.naming.db_suffix, ".db");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(Config::parse("[naming"), Err(Error::Toml(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[naming]\ndb_suffix = \".sqlite\"\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.naming.db_suffix, ".sqlite");
    }

    #[test]
    fn test_load_reports_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[naming").unwrap();
        match Config::load(&path) {
            Err(Error::Config(msg)) => assert!(msg.contains("broken.toml")),
            other => panic!("unexpected result: {other:?}"),
        }

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(Error::Config(_))));
    }
}
