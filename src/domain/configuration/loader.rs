//! Configuration loading.

use std::fs;
use std::path::Path;

use crate::domain::{AppConfig, AppError};

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "fundalloc.toml";

/// Load, normalize and validate the configuration file.
pub fn load_config(path: &Path) -> Result<AppConfig, AppError> {
    if !path.exists() {
        return Err(AppError::ConfigMissing(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let mut config: AppConfig = toml::from_str(content)?;
    config.allocation = config.allocation.normalized();
    if let Some(service) = config.service.as_mut() {
        service.apply_env_override()?;
    }
    config.validate()?;
    Ok(config)
}
