pub mod builder;
pub mod defaults;
pub mod merge;
pub mod types;


pub use builder::ConfigBuilder;
pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Read a YAML configuration file; a missing file yields empty input
pub fn load_config(config_file: impl AsRef<Path>) -> Result<ConfigInput> {
    let path = config_file.as_ref();
    if !path.exists() {
        return Ok(ConfigInput::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("Invalid config file {}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<ConfigInput> {
    if contents.trim().is_empty() {
        return Ok(ConfigInput::default());
    }
    Ok(serde_yaml::from_str(contents)?)
}

/// Load and resolve a configuration file in one step
pub fn resolve_config(config_file: impl AsRef<Path>) -> Result<Config> {
    ConfigBuilder::new()
        .with_file(load_config(config_file)?)
        .resolve()
}
