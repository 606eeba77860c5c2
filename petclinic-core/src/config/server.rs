//! Server configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::EnvLookup;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server listening port
    /// Env: PC_PORT
    /// Default: 8080
    pub port: u16,

    /// Server listening address
    /// Env: PC_HOST
    /// Default: "127.0.0.1"
    pub host: String,

    /// Seconds allowed to read a request body
    /// Env: PC_REQUEST_TIMEOUT
    /// Default: 30
    pub request_timeout: u64,

    /// Maximum request body size in bytes
    /// Env: PC_MAX_BODY_SIZE
    /// Default: 1048576 (1MB)
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            request_timeout: 30,
            max_body_size: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.port = other.port;
        self.host = other.host;
        self.request_timeout = other.request_timeout;
        self.max_body_size = other.max_body_size;
    }

    pub(crate) fn apply_env(&mut self, lookup: EnvLookup<'_>) {
        if let Some(port) = lookup("PC_PORT") {
            if let Ok(p) = port.parse() {
                self.port = p;
            }
        }

        if let Some(host) = lookup("PC_HOST") {
            self.host = host;
        }

        if let Some(timeout) = lookup("PC_REQUEST_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.request_timeout = t;
            }
        }

        if let Some(size) = lookup("PC_MAX_BODY_SIZE") {
            if let Ok(s) = size.parse() {
                self.max_body_size = s;
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            bail!("Invalid port: port must be between 1 and 65535");
        }

        if self.host.is_empty() {
            bail!("Invalid host: host cannot be empty");
        }

        if self.request_timeout == 0 {
            bail!("Invalid request_timeout: must be greater than 0");
        }

        if self.max_body_size == 0 {
            bail!("Invalid max_body_size: must be greater than 0");
        }

        Ok(())
    }

    /// `host:port` as passed to the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values_are_rejected() {
        let cfg = ServerConfig { port: 0, ..Default::default() };
        assert!(cfg.validate().unwrap_err().to_string().contains("Invalid port"));

        let cfg = ServerConfig { host: String::new(), ..Default::default() };
        assert!(cfg.validate().is_err());

        let cfg = ServerConfig { request_timeout: 0, ..Default::default() };
        assert!(cfg.validate().is_err());

        let cfg = ServerConfig { max_body_size: 0, ..Default::default() };
        assert!(cfg.validate().unwrap_err().to_string().contains("max_body_size"));
    }

    #[test]
    fn test_unparsable_env_value_is_ignored() {
        let mut cfg = ServerConfig::default();
        cfg.apply_env(&|key: &str| match key {
            "PC_PORT" => Some("eighty".to_string()),
            "PC_HOST" => Some("0.0.0.0".to_string()),
            _ => None,
        });
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.bind_address(), "0.0.0.0:8080");
    }
}
