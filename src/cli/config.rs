//! `parley check-config`
//!
//! Loads and validates the layered configuration, then prints the
//! effective values as TOML with passwords masked.

use crate::server::config::AppConfig;
use crate::server::{environment_name, load_config, validate_config};
use anyhow::{Context, Result};

pub fn run() -> Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    validate_config(&config).context("Invalid configuration")?;

    println!("# environment: {}", environment_name());
    println!("{}", render(&config)?);
    println!("# configuration OK");
    Ok(())
}

fn render(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(&config.masked()).context("Failed to serialize config")
}
