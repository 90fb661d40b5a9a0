//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub roster: RosterConfig,
    pub ui: UiConfig,
}

/// Roster backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Roster view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Write successfully loaded snapshots to the local fallback cache.
    pub cache_snapshots: bool,
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub start_maximized: bool,
    pub show_activity_log: bool,
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("Server URL cannot be empty".to_string()));
        }
        if !self.server.base_url.starts_with("http") {
            return Err(ConfigError::Validation(
                "Server URL must start with http:// or https://".to_string(),
            ));
        }
        if self.server.timeout_secs < 5 {
            return Err(ConfigError::Validation(
                "Request timeout must be at least 5 seconds".to_string(),
            ));
        }
        if self.server.timeout_secs > 300 {
            return Err(ConfigError::Validation(
                "Request timeout cannot exceed 300 seconds".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self { cache_snapshots: true }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_maximized: false,
            show_activity_log: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_url() {
        let mut config = AppConfig::default();
        config.server.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_non_http_url() {
        let mut config = AppConfig::default();
        config.server.base_url = "ftp://invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let mut config = AppConfig::default();

        config.server.timeout_secs = 1;
        assert!(config.validate().is_err());

        config.server.timeout_secs = 301;
        assert!(config.validate().is_err());

        config.server.timeout_secs = 30;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = AppConfig::default();
        let content = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&content).unwrap();
        assert_eq!(back.server.base_url, config.server.base_url);
        assert_eq!(back.server.timeout_secs, config.server.timeout_secs);
    }

    #[test]
    fn test_timeout_defaults_when_missing() {
        let config: AppConfig = toml::from_str(
            "[server]\nbase_url = \"http://localhost:3000\"\n\n[roster]\ncache_snapshots = true\n\n[ui]\nstart_maximized = false\nshow_activity_log = true\n",
        )
        .unwrap();
        assert_eq!(config.server.timeout_secs, 30);
    }
}
