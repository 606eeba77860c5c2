//! Configuration system for the clinic server
//!
//! # Configuration Hierarchy
//!
//! Values are resolved in the following order (highest priority wins):
//!
//! 1. **Code** (builder methods, CLI flags)
//! 2. **Environment Variables** (`PC_*`)
//! 3. **Config File** (config.toml)
//! 4. **Defaults**
//!
//! # Example
//!
//! ```no_run
//! use petclinic_core::config::ClinicConfig;
//!
//! let config = ClinicConfig::load()?;
//! config.validate()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod logging;
pub mod server;
pub mod storage;

pub use logging::LoggingConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source of configuration overrides, keyed by variable name
pub(crate) type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Complete clinic configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
}

impl ClinicConfig {
    /// Load `config.toml` from the working directory, then the environment
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load configuration from a specific file; a missing file means defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        }

        config.apply_env_vars();

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.server.merge(other.server);
        self.logging.merge(other.logging);
        self.storage.merge(other.storage);
    }

    /// Apply `PC_*` environment variables
    pub fn apply_env_vars(&mut self) {
        self.apply_env(&|key: &str| std::env::var(key).ok());
    }

    pub(crate) fn apply_env(&mut self, lookup: EnvLookup<'_>) {
        self.server.apply_env(lookup);
        self.logging.apply_env(lookup);
        self.storage.apply_env(lookup);
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.logging.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ClinicConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
        assert!(config.storage.seed_demo_data);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9090\n\n[storage]\nseed_demo_data = false\n")
            .unwrap();

        let config = ClinicConfig::from_file(&path).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.format, "human");
        assert!(!config.storage.seed_demo_data);
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClinicConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = ClinicConfig::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load config"));
    }

    #[test]
    fn test_env_overrides_file() {
        let vars: HashMap<&str, &str> =
            [("PC_PORT", "7070"), ("PC_LOG_FORMAT", "json"), ("PC_SEED_DEMO_DATA", "false")]
                .into_iter()
                .collect();

        let mut config = ClinicConfig::default();
        config.server.port = 9090;
        config.apply_env(&|key: &str| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.port, 7070);
        assert_eq!(config.logging.format, "json");
        assert!(!config.storage.seed_demo_data);
    }
}
