//! Configuration loading for the coop monitoring client

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoopError, Result};

/// Coop monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,

    /// Backend server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ServiceConfig {
    /// Filter directives for the tracing subscriber; `RUST_LOG` wins
    /// over the configured level
    pub fn log_filter(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.log_level.clone())
    }
}

/// Backend server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the monitoring backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from an explicit file, the first existing
    /// candidate path, or defaults, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let candidates = ["config/coopmon.yaml", "coopmon.yaml"];

        let mut config = if let Some(path) = path {
            if !path.exists() {
                return Err(CoopError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Self::from_file(path)?
        } else if let Some(found) = candidates.iter().find(|p| Path::new(p).exists()) {
            Self::from_file(Path::new(found))?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Environment variables win over file values
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("COOPMON_BASE_URL") {
            self.server.base_url = url;
        }
        if let Ok(level) = std::env::var("COOPMON_LOG_LEVEL") {
            self.service.log_level = level;
        }
        if let Ok(timeout) = std::env::var("COOPMON_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.server.timeout_secs = secs;
            }
        }
    }
}

// Default functions
fn default_service_name() -> String {
    "coopmon".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    // Default port of the monitoring backend
    "http://localhost:5001".to_string()
}

fn default_timeout() -> u64 {
    5
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // Tests that read the COOPMON_* or RUST_LOG variables are serialized
    // so one test's overrides cannot leak into another
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://localhost:5001");
        assert_eq!(config.server.timeout_secs, 5);
        assert_eq!(config.service.name, "coopmon");
    }

    #[test]
    fn loads_yaml_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  base_url: http://coop.local:8080\n  timeout_secs: 2"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.server.base_url, "http://coop.local:8080");
        assert_eq!(config.server.timeout_secs, 2);
        // Untouched sections fall back to defaults
        assert_eq!(config.service.log_level, "info");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/coopmon.yaml")));
        assert!(matches!(result, Err(CoopError::Config(_))));
    }

    #[test]
    fn env_overrides_win_over_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  base_url: http://from-file:1").unwrap();

        std::env::set_var("COOPMON_BASE_URL", "http://from-env:2");
        let config = Config::load(Some(file.path())).unwrap();
        std::env::remove_var("COOPMON_BASE_URL");

        assert_eq!(config.server.base_url, "http://from-env:2");
    }

    #[test]
    fn rust_log_wins_over_configured_level() {
        let _guard = ENV_LOCK.lock().unwrap();
        let service = ServiceConfig {
            name: "coopmon".to_string(),
            log_level: "debug".to_string(),
        };

        std::env::set_var("RUST_LOG", "trace");
        assert_eq!(service.log_filter(), "trace");

        std::env::remove_var("RUST_LOG");
        assert_eq!(service.log_filter(), "debug");
    }

    #[test]
    fn configured_log_level_flows_through_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("RUST_LOG");

        std::env::set_var("COOPMON_LOG_LEVEL", "warn");
        let config = Config::load(None).unwrap();
        std::env::remove_var("COOPMON_LOG_LEVEL");

        assert_eq!(config.service.log_filter(), "warn");
    }
}
