//! Layered configuration.
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. `applymail.toml` (optional; an explicit `--config` file is required)
//! 3. `APPLYMAIL_*` environment variables
//!
//! Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use applymail_application::SEARCH_DEBOUNCE;
use applymail_infrastructure::FileKeyValueStore;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Prefix of the environment variables read into the configuration.
pub const ENV_PREFIX: &str = "APPLYMAIL";

/// Settings of the command-line tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Key-value storage file for favorites. Platform default when unset.
    pub storage_path: Option<PathBuf>,

    /// Quiet period of the catalog search, in milliseconds.
    pub search_debounce_ms: u64,

    /// HTML-escape substituted values when rendering.
    pub safe_preview: bool,

    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            search_debounce_ms: u64::try_from(SEARCH_DEBOUNCE.as_millis()).unwrap_or(300),
            safe_preview: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Returns the default configuration file path.
    #[must_use]
    pub fn default_file() -> Option<PathBuf> {
        FileKeyValueStore::config_dir().map(|dir| dir.join("applymail.toml"))
    }

    /// Loads configuration from the default or given file and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or any source holds
    /// values of the wrong type.
    pub fn load(explicit_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit_file, Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration with a caller-supplied environment source.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or any source holds
    /// values of the wrong type.
    pub fn load_with(explicit_file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("search_debounce_ms", defaults.search_debounce_ms)?
            .set_default("safe_preview", defaults.safe_preview)?
            .set_default("log_level", defaults.log_level)?;

        match explicit_file {
            Some(path) => builder = builder.add_source(File::from(path).required(true)),
            None => {
                if let Some(path) = Self::default_file() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        builder
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// The storage file, falling back to the platform config directory.
    #[must_use]
    pub fn storage_file(&self) -> Option<PathBuf> {
        self.storage_path
            .clone()
            .or_else(FileKeyValueStore::default_path)
    }

    /// The catalog search quiet period.
    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env(vars: &[(&str, &str)]) -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(
            vars.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        ))
    }

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applymail.toml");
        std::fs::write(&path, "").unwrap();

        let config = AppConfig::load_with(Some(&path), env(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_file_then_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applymail.toml");
        std::fs::write(
            &path,
            "search_debounce_ms = 150\nsafe_preview = true\nstorage_path = \"/tmp/favs.json\"\n",
        )
        .unwrap();

        let config =
            AppConfig::load_with(Some(&path), env(&[("APPLYMAIL_SEARCH_DEBOUNCE_MS", "50")]))
                .unwrap();
        assert_eq!(config.search_debounce_ms, 50);
        assert!(config.safe_preview);
        assert_eq!(config.storage_file(), Some(PathBuf::from("/tmp/favs.json")));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_with(Some(&dir.path().join("nope.toml")), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_type_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applymail.toml");
        std::fs::write(&path, "").unwrap();
        let result = AppConfig::load_with(
            Some(&path),
            env(&[("APPLYMAIL_SEARCH_DEBOUNCE_MS", "soon")]),
        );
        assert!(result.is_err());
    }
}
