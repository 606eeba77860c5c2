//! Log formatting options for different output styles

use std::str::FromStr;

use super::{LogLevel, ParseLogError};

/// How log lines are formatted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Example: {"timestamp":"2024-01-15T10:30:00Z","level":"INFO","target":"petclinic_core::app","message":"Server listening"}
    Json,

    /// Example: 2024-01-15 10:30:00.000 INFO  [petclinic_core::app] Server listening
    Human,

    /// Example: timestamp=2024-01-15T10:30:00Z level=INFO target=petclinic_core::app message="Server listening"
    Logfmt,
}

impl FromStr for LogFormat {
    type Err = ParseLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "human" | "text" => Ok(LogFormat::Human),
            "logfmt" => Ok(LogFormat::Logfmt),
            _ => Err(ParseLogError::Format(s.to_string())),
        }
    }
}

/// One record, detached from `log::Record`
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub level: LogLevel,
    pub message: String,
    pub target: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>, target: impl Into<String>) -> Self {
        Self { timestamp: chrono::Utc::now(), level, message: message.into(), target: target.into() }
    }

    pub fn from_record(record: &log::Record) -> Self {
        Self::new(record.level().into(), record.args().to_string(), record.target())
    }

    fn level_name(&self) -> String {
        format!("{:?}", self.level).to_uppercase()
    }
}

impl LogFormat {
    pub fn format_entry(&self, entry: &LogEntry) -> String {
        match self {
            LogFormat::Json => format_json(entry),
            LogFormat::Human => format_human(entry),
            LogFormat::Logfmt => format_logfmt(entry),
        }
    }
}

fn format_json(entry: &LogEntry) -> String {
    serde_json::json!({
        "timestamp": entry.timestamp.to_rfc3339(),
        "level": entry.level_name(),
        "target": entry.target,
        "message": entry.message,
    })
    .to_string()
}

fn format_human(entry: &LogEntry) -> String {
    format!(
        "{} {:5} [{}] {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
        entry.level_name(),
        entry.target,
        entry.message
    )
}

fn format_logfmt(entry: &LogEntry) -> String {
    format!(
        "timestamp={} level={} target={} message=\"{}\"",
        entry.timestamp.to_rfc3339(),
        entry.level_name(),
        entry.target,
        entry.message.replace('"', "\\\"")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format() {
        let entry = LogEntry::new(LogLevel::Info, "Test message", "test::module");
        let formatted = LogFormat::Json.format_entry(&entry);

        let parsed: serde_json::Value = serde_json::from_str(&formatted).unwrap();
        assert_eq!(parsed["message"], "Test message");
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["target"], "test::module");
    }

    #[test]
    fn test_human_format() {
        let entry = LogEntry::new(LogLevel::Error, "Error occurred", "app::handler");
        let formatted = LogFormat::Human.format_entry(&entry);

        assert!(formatted.contains("ERROR"));
        assert!(formatted.contains("[app::handler] Error occurred"));
    }

    #[test]
    fn test_logfmt_escapes_quotes() {
        let entry = LogEntry::new(LogLevel::Warn, "say \"hi\"", "app::service");
        let formatted = LogFormat::Logfmt.format_entry(&entry);

        assert!(formatted.contains("level=WARN"));
        assert!(formatted.contains("message=\"say \\\"hi\\\"\""));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
