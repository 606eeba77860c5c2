//! Logging configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::EnvLookup;
use crate::logging::{LogFormat, LogLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Env: PC_LOG_LEVEL
    pub level: String,
    /// `human`, `json` or `logfmt`
    /// Env: PC_LOG_FORMAT
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "human".to_string() }
    }
}

impl LoggingConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub(crate) fn apply_env(&mut self, lookup: EnvLookup<'_>) {
        if let Some(level) = lookup("PC_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(format) = lookup("PC_LOG_FORMAT") {
            self.format = format;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.to_logger()?;
        Ok(())
    }

    /// Settings for [`crate::logging::init_logging`]
    pub fn to_logger(&self) -> Result<crate::logging::LoggingConfig> {
        let level: LogLevel = self
            .level
            .parse()
            .with_context(|| format!("Invalid log level: {}", self.level))?;
        let format: LogFormat = self
            .format
            .parse()
            .with_context(|| format!("Invalid log format: {}", self.format))?;
        Ok(crate::logging::LoggingConfig::default().with_level(level).with_format(format))
    }
}
