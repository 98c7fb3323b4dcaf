//! Configuration for the overseer service.

pub mod config;
pub mod reader;

use std::{fs, io, path::Path};

pub use config::*;
use overseer_primitives::errors::ParamsError;
pub use reader::ReaderConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid chain params: {0}")]
    InvalidParams(#[from] ParamsError),
}

/// Reads, parses and validates a TOML config file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path)?;
    parse_config(&raw)
}

/// Parses and validates a TOML config string.
pub fn parse_config(raw: &str) -> Result<Config, ConfigError> {
    let config = toml::from_str::<Config>(raw)?;
    config.chain.validate()?;
    Ok(config)
}
