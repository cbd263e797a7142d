//! # Configuration Loader
//!
//! Reads `config.toml` into [`AppConfig`]. Loading is pure: whatever is in
//! the file is accepted, missing keys become empty values. Defaults for empty
//! values are filled in by [`resolve_config`].

use std::path::{Path, PathBuf};

use anyhow::Context;
use lp_core::config::{AppConfig, NetworkConfig};

pub const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "lanpeer";

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// The per-user directory holding the database, settings and config file.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

/// Pick the config to run with.
///
/// An explicit path must exist. Without one, `config.toml` in the data
/// directory is used when present, otherwise built-in defaults.
pub fn resolve_config(explicit: Option<PathBuf>, data_dir: &Path) -> anyhow::Result<AppConfig> {
    let config = match explicit {
        Some(path) => load_config(path)?,
        None => {
            let candidate = data_dir.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                load_config(candidate)?
            } else {
                AppConfig::default()
            }
        }
    };

    Ok(fill_defaults(config, data_dir))
}

/// Replace empty values with defaults and anchor relative paths at `data_dir`.
fn fill_defaults(mut config: AppConfig, data_dir: &Path) -> AppConfig {
    let defaults = AppConfig::default();

    config.storage.database_path = anchor(
        config.storage.database_path,
        defaults.storage.database_path,
        data_dir,
    );
    config.storage.settings_path = anchor(
        config.storage.settings_path,
        defaults.storage.settings_path,
        data_dir,
    );
    if !config.logging.log_dir.as_os_str().is_empty() && config.logging.log_dir.is_relative() {
        config.logging.log_dir = data_dir.join(&config.logging.log_dir);
    }

    let network_defaults = NetworkConfig::default();
    if config.network.bridge_port == 0 {
        config.network.bridge_port = network_defaults.bridge_port;
    }
    if config.network.bridge_timeout_ms == 0 {
        config.network.bridge_timeout_ms = network_defaults.bridge_timeout_ms;
    }

    config
}

fn anchor(path: PathBuf, default: PathBuf, data_dir: &Path) -> PathBuf {
    let path = if path.as_os_str().is_empty() {
        default
    } else {
        path
    };
    if path.is_relative() {
        data_dir.join(path)
    } else {
        path
    }
}
