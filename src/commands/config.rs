//! Config subcommands handler

use anyhow::{Context, Result};

use harvest::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    println!("{}", render(&config)?);
    Ok(())
}

/// Print the configuration file location.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

pub(crate) fn render(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}
