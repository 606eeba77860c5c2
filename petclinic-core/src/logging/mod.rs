//! Process logger
//!
//! Built on the standard `log` crate: install once at startup, then use
//! `log::info!` and friends anywhere.
//!
//! ```rust,no_run
//! use petclinic_core::logging::{init_logging, LoggingConfig};
//!
//! init_logging(&LoggingConfig::production()).unwrap();
//! log::info!("Server starting on port {}", 8080);
//! ```

pub mod config;
pub mod formatter;

pub use config::{LogLevel, LogTarget, LoggingConfig};
pub use formatter::{LogEntry, LogFormat};

use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseLogError {
    #[error("unknown log level '{0}'")]
    Level(String),
    #[error("unknown log format '{0}'")]
    Format(String),
}

/// Install the process-wide logger.
///
/// Only the first call has an effect; later calls are no-ops.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let mut outcome = Ok(());
    INIT.call_once(|| {
        outcome = log::set_boxed_logger(Box::new(ClinicLogger::new(config.clone())))
            .map(|()| log::set_max_level(config.level.into()))
            .map_err(anyhow::Error::from);
    });
    outcome
}

struct ClinicLogger {
    config: LoggingConfig,
}

impl ClinicLogger {
    fn new(config: LoggingConfig) -> Self {
        Self { config }
    }
}

impl log::Log for ClinicLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        LogLevel::from(metadata.level()) <= self.config.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.config.format.format_entry(&LogEntry::from_record(record));
        let _ = match self.config.target {
            LogTarget::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            LogTarget::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
        };
    }

    fn flush(&self) {
        let _ = match self.config.target {
            LogTarget::Stdout => std::io::stdout().flush(),
            LogTarget::Stderr => std::io::stderr().flush(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_enabled_respects_level() {
        let logger = ClinicLogger::new(LoggingConfig::default().with_level(LogLevel::Warn));
        let warn = log::Metadata::builder().level(log::Level::Warn).build();
        let info = log::Metadata::builder().level(log::Level::Info).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&info));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        assert!(init_logging(&LoggingConfig::default()).is_ok());
        assert!(init_logging(&LoggingConfig::development()).is_ok());
    }
}
