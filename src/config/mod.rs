//! Configuration management.
//!
//! Two sources feed an invocation:
//!
//! - [`FilenameSet`], resolved from the project's `.agents-md.json`.
//! - [`AgentsMdConfig`], the user-level tool configuration (`config.toml`)
//!   controlling where session records live and how logging behaves.

mod project;

pub use project::{DEFAULT_FILENAMES, FilenameSet, PROJECT_CONFIG_FILENAME};

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration for agents-md.
#[derive(Debug, Clone)]
pub struct AgentsMdConfig {
    /// Directory holding per-session registry records.
    pub registry_dir: PathBuf,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Logging settings from the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `"warn"` or `"agents_md=debug"`.
    pub level: Option<String>,
    /// Output format: `"pretty"` or `"json"`.
    pub format: Option<String>,
    /// Log file path; logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Registry directory.
    pub registry_dir: Option<String>,
    /// Logging configuration.
    pub logging: Option<LoggingSettings>,
}

impl Default for AgentsMdConfig {
    fn default() -> Self {
        Self {
            registry_dir: std::env::temp_dir(),
            logging: LoggingSettings::default(),
        }
    }
}

impl AgentsMdConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/agents-md/` on macOS)
    /// 2. XDG config dir (`~/.config/agents-md/` for Unix compatibility)
    ///
    /// Returns default configuration if no readable config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs.config_dir().join("agents-md").join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config;
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("agents-md")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config;
            }
        }

        Self::default()
    }

    /// Loads configuration from an explicit path, or the default location.
    ///
    /// Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error only when an explicit path is given and cannot be
    /// read or parsed.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Converts a `ConfigFile` to `AgentsMdConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(registry_dir) = file.registry_dir {
            config.registry_dir = PathBuf::from(registry_dir);
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    fn apply_env_overrides(&mut self) {
        if let Some(dir) = non_empty_env("AGENTS_MD_REGISTRY_DIR") {
            self.registry_dir = PathBuf::from(dir);
        }
        if let Some(level) = non_empty_env("AGENTS_MD_LOG") {
            self.logging.level = Some(level);
        }
        if let Some(format) = non_empty_env("AGENTS_MD_LOG_FORMAT") {
            self.logging.format = Some(format);
        }
        if let Some(file) = non_empty_env("AGENTS_MD_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(file));
        }
    }

    /// Sets the registry directory.
    #[must_use]
    pub fn with_registry_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.registry_dir = path.into();
        self
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_registry_dir_is_temp() {
        let config = AgentsMdConfig::default();
        assert_eq!(config.registry_dir, std::env::temp_dir());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
registry_dir = "/var/tmp/agents"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        let config = AgentsMdConfig::load_from_file(&path).unwrap();
        assert_eq!(config.registry_dir, PathBuf::from("/var/tmp/agents"));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.format.as_deref(), Some("json"));
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = AgentsMdConfig::load_from_file(&dir.path().join("absent.toml"));
        assert!(matches!(
            result,
            Err(crate::Error::OperationFailed { ref operation, .. }) if operation == "read_config_file"
        ));
    }

    #[test]
    fn test_load_from_malformed_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "registry_dir = [").unwrap();

        let result = AgentsMdConfig::load_from_file(&path);
        assert!(matches!(
            result,
            Err(crate::Error::OperationFailed { ref operation, .. }) if operation == "parse_config_file"
        ));
    }

    #[test]
    fn test_with_registry_dir() {
        let config = AgentsMdConfig::new().with_registry_dir("/custom");
        assert_eq!(config.registry_dir, PathBuf::from("/custom"));
    }
}
