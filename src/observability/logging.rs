//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Filter directive used when nothing else is configured.
///
/// Hooks run on every tool call; only problems are worth reporting.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Filter directive used with `--verbose`.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name, defaulting to [`LogFormat::Pretty`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Event filter.
    pub filter: EnvFilter,
    /// Output format.
    pub format: LogFormat,
    /// Log file; stderr when `None`.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds logging configuration from config settings.
    ///
    /// A configured level wins over `verbose`. An unparseable directive
    /// falls back to the default level.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        let default_level = if verbose {
            VERBOSE_LOG_LEVEL
        } else {
            DEFAULT_LOG_LEVEL
        };
        let directive = settings
            .and_then(|s| s.level.as_deref())
            .unwrap_or(default_level);
        let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(default_level));

        let format = settings
            .and_then(|s| s.format.as_deref())
            .map(LogFormat::parse)
            .unwrap_or_default();
        let file = settings.and_then(|s| s.file.clone());

        Self {
            filter,
            format,
            file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("unknown"), LogFormat::Pretty);
    }

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::from_settings(None, false);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file.is_none());
        assert_eq!(config.filter.to_string(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_verbose_raises_level() {
        let config = LoggingConfig::from_settings(None, true);
        assert_eq!(config.filter.to_string(), VERBOSE_LOG_LEVEL);
    }

    #[test]
    fn test_settings_override_verbose() {
        let settings = LoggingSettings {
            level: Some("agents_md=trace".to_string()),
            format: Some("json".to_string()),
            file: Some(PathBuf::from("/tmp/agents-md.log")),
        };
        let config = LoggingConfig::from_settings(Some(&settings), true);
        assert_eq!(config.filter.to_string(), "agents_md=trace");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file, Some(PathBuf::from("/tmp/agents-md.log")));
    }
}
