//! Configuration commands.

use std::path::Path;

use crate::config::CalplanConfig;
use crate::error::{CliError, CliResult};

/// Renders the effective configuration as TOML.
pub fn dump(config: &CalplanConfig, source: &Path) -> CliResult<String> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| CliError::Config(format!("failed to serialize config: {}", e)))?;
    Ok(format!("# config.toml ({})\n{}", source.display(), toml_str))
}

/// Validates the configuration.
pub fn validate(config: &CalplanConfig) -> CliResult<String> {
    config.validate()?;
    Ok("Configuration is valid.".to_string())
}

/// Shows the configuration file and store paths.
pub fn path(config: &CalplanConfig, source: &Path) -> CliResult<String> {
    Ok(format!(
        "config: {}\nstore: {}",
        source.display(),
        config.store_path().display()
    ))
}
