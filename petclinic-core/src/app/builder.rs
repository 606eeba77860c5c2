//! Builder pattern for ClinicServer

use anyhow::Result;

use super::{ClinicServer, Router};
use crate::config::ClinicConfig;
use crate::handlers::Clinic;

/// Builder for ClinicServer
pub struct ClinicServerBuilder {
    config: ClinicConfig,
    clinic: Option<Clinic>,
}

impl ClinicServerBuilder {
    /// Create a new builder, loading `config.toml` and `PC_*` variables.
    /// Falls back to defaults when the file cannot be read.
    pub fn new() -> Self {
        let config = ClinicConfig::load().unwrap_or_else(|e| {
            log::warn!("Using default configuration: {:#}", e);
            ClinicConfig::default()
        });
        Self::with_config(config)
    }

    /// Create a builder with custom configuration
    pub fn with_config(config: ClinicConfig) -> Self {
        Self { config, clinic: None }
    }

    /// Set server port (overrides config file and env vars)
    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Set server host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.config.server.host = host.into();
        self
    }

    /// Set max body size
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.config.server.max_body_size = size;
        self
    }

    /// Seconds allowed to receive a request body
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.config.server.request_timeout = timeout;
        self
    }

    /// Use these repositories instead of a fresh in-memory store
    pub fn with_clinic(mut self, clinic: Clinic) -> Self {
        self.clinic = Some(clinic);
        self
    }

    /// Validate the configuration and assemble the server
    pub fn build(self) -> Result<ClinicServer> {
        self.config.validate()?;

        let clinic = match self.clinic {
            Some(clinic) => clinic,
            None => Clinic::in_memory(self.config.storage.seed_demo_data),
        };

        Ok(ClinicServer { config: self.config, clinic, router: Router::clinic() })
    }

    /// Build and serve until Ctrl-C
    pub async fn serve(self) -> Result<()> {
        self.build()?.serve().await
    }
}

impl Default for ClinicServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_config() {
        let server = ClinicServerBuilder::with_config(ClinicConfig::default())
            .with_port(9999)
            .with_host("0.0.0.0")
            .with_max_body_size(512)
            .build()
            .unwrap();
        assert_eq!(server.config().server.bind_address(), "0.0.0.0:9999");
        assert_eq!(server.config().server.max_body_size, 512);
    }

    #[test]
    fn test_invalid_config_fails_build() {
        let result = ClinicServerBuilder::with_config(ClinicConfig::default()).with_port(0).build();
        assert!(result.is_err());
    }
}
