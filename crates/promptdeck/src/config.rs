//! Configuration file support for promptdeck.
//!
//! Loads configuration from `promptdeck.toml` in the working directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The config file name
pub const CONFIG_FILE_NAME: &str = "promptdeck.toml";

/// Configuration loaded from `promptdeck.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Data directory override for the storage backend
    pub data_dir: Option<PathBuf>,
    /// Default log filter when neither `--log-level` nor `RUST_LOG` is set
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_parses_fields() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "data_dir = \"/tmp/deck\"\nlog_level = \"debug\"\n",
        )
        .unwrap();

        let config = AppConfig::load(dir.path()).unwrap().unwrap();
        assert_eq!(config.data_dir.as_deref(), Some(Path::new("/tmp/deck")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_unknown_fields_are_a_hard_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "wat = true\n").unwrap();

        assert!(AppConfig::load(dir.path()).is_err());
    }
}
