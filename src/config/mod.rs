//! Configuration management for harvest

mod io;
mod types;

pub use io::CONFIG_ENV;
pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

impl Config {
    /// Get the config file path (~/.config/harvest/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/harvest)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        io::save(self)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Expand ~ in the parameter output directory
    pub fn output_directory(&self) -> PathBuf {
        let dir = &self.output.directory;
        if let Some(stripped) = dir.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        }
        PathBuf::from(dir)
    }

    /// Poll interval for watching result files
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.decoder.poll_interval_secs)
    }
}
