// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading.

use crate::error::{ConfigError, GfcError, Result};
use std::path::{Path, PathBuf};

use super::schema::GfcConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["gfc.toml", ".gfc.toml", ".config/gfc.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        // Try parent directory
        if !current.pop() {
            break;
        }
    }

    // Also check user's home directory
    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        let gfc_config = config_dir.join("gfc").join("config.toml");
        if gfc_config.is_file() {
            return Some(gfc_config);
        }
    }

    None
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<GfcConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(GfcConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<GfcConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(GfcError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        GfcError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<GfcConfig> {
    let config: GfcConfig = toml::from_str(content).map_err(|e| {
        GfcError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;

    validate(&config)?;
    Ok(config)
}

fn validate(config: &GfcConfig) -> Result<()> {
    if config.commit.max_subject_length == 0 {
        return Err(GfcError::Config(ConfigError::InvalidValue {
            key: "commit.max_subject_length".to_string(),
            message: "must be greater than zero".to_string(),
        }));
    }

    if config.commit.template(&config.commit.default_template).is_none() {
        return Err(GfcError::Config(ConfigError::InvalidValue {
            key: "commit.default_template".to_string(),
            message: format!(
                "no template named '{}' is configured",
                config.commit.default_template
            ),
        }));
    }

    if config.version.config_file.trim().is_empty() {
        return Err(GfcError::Config(ConfigError::InvalidValue {
            key: "version.config_file".to_string(),
            message: "must not be empty".to_string(),
        }));
    }

    Ok(())
}
