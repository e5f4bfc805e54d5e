// Configuration management
use crate::error::{PanelError, Result};
use crate::expiry::{self, DEFAULT_RECENT_WINDOW_HOURS, MAX_RECENT_WINDOW_HOURS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub panel: PanelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    pub database_url: Option<String>,
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_grid_columns")]
    pub grid_columns: usize,
}

fn default_refresh_interval() -> u64 {
    60
}

fn default_grid_columns() -> usize {
    3
}

/// Widest grid the panel lays out
pub const MAX_GRID_COLUMNS: usize = 12;

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            grid_columns: default_grid_columns(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default = "default_recent_window")]
    pub recent_window_hours: i64,
}

fn default_recent_window() -> i64 {
    DEFAULT_RECENT_WINDOW_HOURS
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            recent_window_hours: default_recent_window(),
        }
    }
}

const SAMPLE_CONFIG: &str = r#"# slotwatch configuration
# Location priority:
#   1. $XDG_CONFIG_HOME/slotwatch/config.toml (if XDG_CONFIG_HOME is set)
#   2. ~/.config/slotwatch/config.toml (if ~/.config exists)
#   3. ~/.slotwatch/config.toml (fallback)
#
# You can also set these values via environment variables:
#   SLOTWATCH_DATABASE_URL
#   SLOTWATCH_SERVICE
#   SLOTWATCH_AUTH_TOKEN

[store]
# Realtime database URL (required)
# Example: database_url = "https://my-project-default-rtdb.firebaseio.com"
database_url = ""

# Service whose rentals are shown (required)
# Example: service = "netflix"
service = ""

# Database secret or ID token, sent as the `auth` query parameter
# auth_token = ""

[ui]
# How often the panel refetches and reclassifies, in seconds (default: 60)
refresh_interval_secs = 60

# Time cells per row in the ACTIVE and EXPIRED grids (default: 3)
grid_columns = 3

[panel]
# How long an expired rental stays listed, in hours (default: 24)
recent_window_hours = 24
"#;

impl Config {
    /// Get the config directory path
    ///
    /// Priority:
    /// 1. XDG_CONFIG_HOME/slotwatch (if env var is set)
    /// 2. ~/.config/slotwatch (if ~/.config exists)
    /// 3. ~/.slotwatch (fallback on Unix)
    /// 4. Platform default on Windows
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg_config).join("slotwatch"));
        }

        #[cfg(unix)]
        {
            if let Some(home_dir) = dirs::home_dir() {
                let xdg_config = home_dir.join(".config");

                if xdg_config.exists() {
                    return Ok(xdg_config.join("slotwatch"));
                }

                return Ok(home_dir.join(".slotwatch"));
            }
        }

        #[cfg(not(unix))]
        {
            if let Some(config_dir) = dirs::config_dir() {
                return Ok(config_dir.join("slotwatch"));
            }
        }

        Err(PanelError::ConfigError(
            "Could not determine config directory".to_string(),
        ))
    }

    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, environment variables, and defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_file_path()?)?;
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific file, falling back to defaults if absent
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Config::default());
        }

        tracing::debug!("Loading config from: {}", config_path.display());
        let contents = fs::read_to_string(config_path)
            .map_err(|e| PanelError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = toml::from_str(&contents)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("SLOTWATCH_DATABASE_URL") {
            tracing::debug!("Using SLOTWATCH_DATABASE_URL from environment: {}", url);
            self.store.database_url = Some(url);
        }

        if let Ok(service) = std::env::var("SLOTWATCH_SERVICE") {
            tracing::debug!("Using SLOTWATCH_SERVICE from environment: {}", service);
            self.store.service = Some(service);
        }

        if let Ok(token) = std::env::var("SLOTWATCH_AUTH_TOKEN") {
            tracing::debug!("Using SLOTWATCH_AUTH_TOKEN from environment");
            self.store.auth_token = Some(token);
        }

        self.normalize();
    }

    /// Apply command-line overrides, which win over file and environment
    pub fn with_overrides(mut self, database_url: Option<String>, service: Option<String>) -> Self {
        if database_url.is_some() {
            self.store.database_url = database_url;
        }
        if service.is_some() {
            self.store.service = service;
        }
        self.normalize();
        self
    }

    /// Treat blank strings from the sample file as unset
    fn normalize(&mut self) {
        for field in [
            &mut self.store.database_url,
            &mut self.store.service,
            &mut self.store.auth_token,
        ] {
            if field.as_deref().map(str::trim) == Some("") {
                *field = None;
            }
        }
        if self.ui.grid_columns == 0 {
            self.ui.grid_columns = default_grid_columns();
        }
        self.ui.grid_columns = self.ui.grid_columns.min(MAX_GRID_COLUMNS);
    }

    fn validate(&self) -> Result<()> {
        let hours = self.panel.recent_window_hours;
        if !(1..=MAX_RECENT_WINDOW_HOURS).contains(&hours) {
            return Err(PanelError::ConfigError(format!(
                "recent_window_hours must be between 1 and {}, got {}",
                MAX_RECENT_WINDOW_HOURS, hours
            )));
        }
        Ok(())
    }

    /// Create a sample config file with comments
    pub fn create_sample() -> Result<PathBuf> {
        let config_path = Self::config_file_path()?;
        Self::write_sample(&config_path)?;
        Ok(config_path)
    }

    fn write_sample(config_path: &Path) -> Result<()> {
        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).map_err(|e| {
                PanelError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        // Don't overwrite existing config
        if config_path.exists() {
            return Err(PanelError::ConfigError(format!(
                "Config file already exists at: {}",
                config_path.display()
            )));
        }

        fs::write(config_path, SAMPLE_CONFIG)
            .map_err(|e| PanelError::ConfigError(format!("Failed to write sample config: {}", e)))?;
        tracing::info!("Created sample config at: {}", config_path.display());

        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.store.database_url.is_some() && self.store.service.is_some()
    }

    /// Get store location, returning an error if incomplete
    pub fn store_location(&self) -> Result<(&str, &str)> {
        let database_url = self.store.database_url.as_deref()
            .ok_or_else(|| PanelError::ConfigError(
                "database_url not configured. Set it in config file, SLOTWATCH_DATABASE_URL or --database-url".to_string()
            ))?;

        let service = self.store.service.as_deref()
            .ok_or_else(|| PanelError::ConfigError(
                "service not configured. Set it in config file, SLOTWATCH_SERVICE or --service".to_string()
            ))?;

        Ok((database_url, service))
    }

    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.ui.refresh_interval_secs.max(1))
    }

    pub fn recent_window(&self) -> chrono::Duration {
        expiry::recent_window(self.panel.recent_window_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert!(!config.is_complete());
        assert_eq!(config.ui.refresh_interval_secs, 60);
        assert_eq!(config.ui.grid_columns, 3);
        assert_eq!(config.panel.recent_window_hours, 24);
    }

    #[test]
    fn test_sample_config_parses_as_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::write_sample(&path).unwrap();
        let config = Config::load_from(&path).unwrap();

        assert!(!config.is_complete());
        assert!(config.store_location().is_err());
        assert_eq!(config.refresh_interval(), std::time::Duration::from_secs(60));
        assert!(Config::write_sample(&path).is_err());
    }

    #[test]
    fn test_load_and_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[store]
database_url = "https://db.example.com"
service = "music"

[panel]
recent_window_hours = 6
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.store_location().unwrap(),
            ("https://db.example.com", "music")
        );
        assert_eq!(config.recent_window(), chrono::Duration::hours(6));

        let config = config.with_overrides(None, Some("video".to_string()));
        assert_eq!(
            config.store_location().unwrap(),
            ("https://db.example.com", "video")
        );
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[store\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(PanelError::Toml(_))));
    }

    #[test]
    fn test_recent_window_out_of_range_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        for hours in ["0", "-5", "10000000000"] {
            fs::write(&path, format!("[panel]\nrecent_window_hours = {}\n", hours)).unwrap();
            assert!(matches!(
                Config::load_from(&path),
                Err(PanelError::ConfigError(_))
            ));
        }
    }

    #[test]
    fn test_grid_columns_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        fs::write(&path, "[ui]\ngrid_columns = 1000000\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().ui.grid_columns, MAX_GRID_COLUMNS);

        fs::write(&path, "[ui]\ngrid_columns = 0\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().ui.grid_columns, 3);
    }
}
