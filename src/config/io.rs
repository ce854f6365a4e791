//! Configuration I/O operations

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::Config;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "HARVEST_CONFIG";

/// Get the config file path ($HARVEST_CONFIG or ~/.config/harvest/config.toml)
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let config_dir = config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Get the config directory path (~/.config/harvest)
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("harvest"))
}

/// Load configuration from the default location, or return defaults if not found
pub fn load() -> Result<Config> {
    load_from(&config_path()?)
}

/// Load configuration from a specific file, or return defaults if it does not exist
pub fn load_from(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    Ok(config)
}

/// Save configuration to the default location
pub fn save(config: &Config) -> Result<()> {
    save_to(config, &config_path()?)
}

/// Save configuration to a specific file
pub fn save_to(config: &Config, config_path: &Path) -> Result<()> {
    // Ensure config directory exists
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(config_path, contents)
        .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

    Ok(())
}
