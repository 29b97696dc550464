//! Configuration file parsing for the dashboard.
//!
//! Loads the bind address plus the `[data]` and `[map]` tables shared with
//! the CLI.

use robomapa_engine::DataConfig;
use robomapa_render::MapSettings;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Dashboard configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// Dashboard configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Input files and matching strategy
    #[serde(default)]
    pub data: DataConfig,

    /// Base map settings
    #[serde(default)]
    pub map: MapSettings,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            data: DataConfig::default(),
            map: MapSettings::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: DashboardConfig = toml::from_str(&contents)?;

        if config.bind_address.trim().is_empty() {
            return Err(ConfigError::MissingField("bind_address".to_string()));
        }
        if config.data.zones_file.trim().is_empty() {
            return Err(ConfigError::MissingField("data.zones_file".to_string()));
        }

        Ok(config)
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robomapa_engine::StrategyKind;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.data.zones_file, "final-df-Leon.csv");
        assert_eq!(config.map.zoom, 12);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000

            [data]
            dir = "/srv/robos"
            strategy = "substring"

            [map]
            zoom = 13
        "#;

        let config: DashboardConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.data.strategy, StrategyKind::Substring);
        assert_eq!(config.map.zoom, 13);
        assert_eq!(config.map.center, [21.1167, -101.6833]);
    }

    #[test]
    fn test_from_file_rejects_blank_bind_address() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_address = \"\"").unwrap();

        let err = DashboardConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(field) if field == "bind_address"));
    }
}
