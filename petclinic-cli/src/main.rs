//! Pet clinic server.
//!
//! ```bash
//! petclinic --port 8080 --log-format json
//! ```
//!
//! Configuration is read from `config.toml` (or `--config`), then `PC_*`
//! environment variables, then the flags below.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use petclinic_core::config::ClinicConfig;
use petclinic_core::logging::init_logging;
use petclinic_core::{Clinic, ClinicServer};

#[derive(Parser, Debug)]
#[command(name = "petclinic", about = "Pet clinic web application server", version)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Listening port
    #[arg(long)]
    port: Option<u16>,

    /// Listening address
    #[arg(long)]
    host: Option<String>,

    /// Start with an empty clinic instead of the demo data
    #[arg(long)]
    no_seed: bool,

    /// error, warn, info, debug or trace
    #[arg(long)]
    log_level: Option<String>,

    /// human, json or logfmt
    #[arg(long)]
    log_format: Option<String>,
}

impl Cli {
    /// File and environment first, flags last
    fn resolve_config(&self) -> Result<ClinicConfig> {
        let mut config = ClinicConfig::load_from(&self.config)?;

        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if self.no_seed {
            config.storage.seed_demo_data = false;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    init_logging(&config.logging.to_logger()?)?;
    log::info!(
        "Starting pet clinic on {} (demo data: {})",
        config.server.bind_address(),
        config.storage.seed_demo_data
    );

    let clinic = Clinic::in_memory(config.storage.seed_demo_data);
    ClinicServer::with_config(config).with_clinic(clinic).build()?.serve().await?;

    log::info!("Pet clinic stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic.toml");
        std::fs::write(&path, "[server]\nport = 9000\nhost = \"0.0.0.0\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "petclinic",
            "--config",
            path.to_str().unwrap(),
            "--port",
            "9100",
            "--no-seed",
            "--log-format",
            "json",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.storage.seed_demo_data);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_bad_log_level_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "petclinic",
            "--config",
            dir.path().join("none.toml").to_str().unwrap(),
            "--log-level",
            "chatty",
        ])
        .unwrap();
        assert!(cli.resolve_config().is_err());
    }
}
