use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::interpolation::{
    interpolate_toml,
    InterpolationError,
};
use super::schema::MigrationConfig;

/// Config file used when neither the CLI nor the environment names one
pub const DEFAULT_CONFIG_FILE: &str = "artimigrate.toml";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] InterpolationError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ConfigLoadResult<T> = Result<T, ConfigLoadError>;

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> ConfigLoadResult<MigrationConfig> {
        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;

        tracing::debug!(
            path = %path.display(),
            environments = config.environments.len(),
            "Loaded config"
        );

        Ok(config)
    }

    pub fn parse(content: &str) -> ConfigLoadResult<MigrationConfig> {
        let mut value: toml::Value = toml::from_str(content)?;

        interpolate_toml(&mut value)?;

        value.try_into().map_err(|e| {
            ConfigLoadError::InvalidConfig(format!("Failed to deserialize config: {}", e))
        })
    }
}
