//! Application configuration loaded from environment variables.

use std::str::FromStr;

use domain::{SequenceConfig, ServiceConfig};
use serde::{Deserialize, Serialize};

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Application configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `DATABASE_URL` — PostgreSQL connection string (default: unset, records
///   are kept in memory)
/// - `SEQUENCE_START` — first sequence number issued per kind (default: `1001`)
/// - `SEQUENCE_PREFIX` — text placed before sequence digits (default: empty)
/// - `SEQUENCE_WIDTH` — zero-padded digit count (default: unset)
/// - `RECENT_LIMIT` — default size of the recent list (default: `10`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `text` or `json` (default: `text`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: Option<String>,
    pub sequence_start: u64,
    pub sequence_prefix: String,
    pub sequence_width: Option<usize>,
    pub recent_limit: usize,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            sequence_start: parsed(&lookup, "SEQUENCE_START").unwrap_or(defaults.sequence_start),
            sequence_prefix: lookup("SEQUENCE_PREFIX").unwrap_or(defaults.sequence_prefix),
            sequence_width: parsed(&lookup, "SEQUENCE_WIDTH").or(defaults.sequence_width),
            recent_limit: parsed(&lookup, "RECENT_LIMIT").unwrap_or(defaults.recent_limit),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: parsed(&lookup, "LOG_FORMAT").unwrap_or(defaults.log_format),
        }
    }

    /// Returns the quotation service settings.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            sequence: SequenceConfig {
                start: self.sequence_start,
                prefix: self.sequence_prefix.clone(),
                width: self.sequence_width,
            },
            recent_limit: self.recent_limit,
            ..ServiceConfig::default()
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|value| value.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            sequence_start: 1001,
            sequence_prefix: String::new(),
            sequence_width: None,
            recent_limit: 10,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}
