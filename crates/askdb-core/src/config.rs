//! Configuration management for askdb.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable that overrides [`Config::server_url`].
pub const SERVER_ENV: &str = "ASKDB_SERVER";

/// Main configuration structure for askdb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the query server (without the `/query` path).
    pub server_url: String,

    /// Whole-request timeout handed to the HTTP client. `None` leaves the
    /// transport's own behavior in place.
    pub request_timeout_secs: Option<u64>,

    /// How often the TUI polls `GET /health`.
    pub health_interval_secs: u64,

    /// Terminal UI settings.
    pub tui: TuiConfig,
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Cells wider than this are truncated in the result table.
    pub max_cell_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            request_timeout_secs: None,
            health_interval_secs: 5,
            tui: TuiConfig::default(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { max_cell_width: 40 }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;

        config.normalize();
        config.validate()?;

        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults.
    /// `ASKDB_SERVER` is applied on top either way.
    pub fn load_or_default(path: &Path) -> crate::Result<Self> {
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };

        if let Ok(server) = std::env::var(SERVER_ENV) {
            if !server.trim().is_empty() {
                config.set_server_url(&server);
            }
        }

        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Override the server URL (command-line flag or environment).
    pub fn set_server_url(&mut self, url: &str) {
        self.server_url = url.trim().to_string();
        self.normalize();
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs.max(1))
    }

    /// Strip trailing slashes so endpoint paths can be appended directly.
    fn normalize(&mut self) {
        while self.server_url.ends_with('/') {
            self.server_url.pop();
        }
    }

    fn validate(&self) -> crate::Result<()> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(crate::Error::Config(format!(
                "server_url must start with http:// or https:// (got {:?})",
                self.server_url
            )));
        }
        if self.tui.max_cell_width < 4 {
            return Err(crate::Error::Config(
                "tui.max_cell_width must be at least 4".to_string(),
            ));
        }
        Ok(())
    }
}
