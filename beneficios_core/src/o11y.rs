//! Tracing bootstrap.
//!
//! Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
//! overrides the default filter.

use crate::{Error, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" | "pretty" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `BENEFICIOS_LOG_FORMAT` (`text` or `json`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(v) = lookup("BENEFICIOS_LOG_FORMAT").filter(|v| !v.trim().is_empty()) {
            cfg.format = LogFormat::parse(&v)
                .ok_or_else(|| Error::InvalidInput(format!("invalid BENEFICIOS_LOG_FORMAT: {v}")))?;
        }
        Ok(cfg)
    }
}

pub fn init_from_env() -> Result<()> {
    init(&LogConfig::from_env()?)
}

/// Installs the global subscriber. Fails with `Conflict` if one is already set.
pub fn init(cfg: &LogConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match cfg.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };
    installed.map_err(|e| Error::Conflict(format!("tracing already initialized: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formats() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" text "), Some(LogFormat::Text));
        assert_eq!(LogFormat::parse("xml"), None);
    }

    #[test]
    fn config_from_lookup() {
        let cfg = LogConfig::from_lookup(|k| {
            (k == "BENEFICIOS_LOG_FORMAT").then(|| "json".to_string())
        })
        .unwrap();
        assert_eq!(cfg.format, LogFormat::Json);
        assert!(LogConfig::from_lookup(|_| Some("yaml".into())).is_err());
    }

    #[test]
    fn second_init_is_a_conflict() {
        let cfg = LogConfig::default();
        // The first call may race other tests for the global slot.
        let _ = init(&cfg);
        assert!(matches!(init(&cfg), Err(Error::Conflict(_))));
    }
}
