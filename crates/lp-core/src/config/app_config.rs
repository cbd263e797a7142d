//! Application configuration DTO.
//!
//! Mapping from TOML is pure data loading: absent sections and keys become
//! empty values, nothing is validated here.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BRIDGE_PORT: u16 = 1128;
pub const DEFAULT_BRIDGE_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub network: NetworkConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database file.
    pub database_path: PathBuf,
    /// JSON settings document holding the device id and nickname.
    pub settings_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// TCP port the identity bridge connects to and listens on.
    pub bridge_port: u16,
    pub bridge_timeout_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for the rolling log file; stdout only when empty.
    pub log_dir: PathBuf,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bridge_port: DEFAULT_BRIDGE_PORT,
            bridge_timeout_ms: DEFAULT_BRIDGE_TIMEOUT_MS,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                database_path: PathBuf::from("lanpeer.db"),
                settings_path: PathBuf::from("settings.json"),
            },
            network: NetworkConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Map a parsed TOML document onto the config, taking each value as found.
    pub fn from_toml(value: &toml::Value) -> anyhow::Result<Self> {
        let path = |section: &str, key: &str| {
            value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .map(PathBuf::from)
                .unwrap_or_default()
        };
        let integer = |section: &str, key: &str| {
            value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
        };

        Ok(Self {
            storage: StorageConfig {
                database_path: path("storage", "database_path"),
                settings_path: path("storage", "settings_path"),
            },
            network: NetworkConfig {
                bridge_port: integer("network", "bridge_port") as u16,
                bridge_timeout_ms: integer("network", "bridge_timeout_ms").max(0) as u64,
            },
            logging: LoggingConfig {
                log_dir: path("logging", "log_dir"),
            },
        })
    }
}
