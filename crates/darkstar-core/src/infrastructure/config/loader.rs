use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::interpolation::{
    interpolate_toml,
    InterpolationError,
};
use super::schema::GatewayConfig;

pub const CONFIG_PATH_VAR: &str = "DARKSTAR_CONFIG";
pub const BIND_ADDR_VAR: &str = "DARKSTAR_BIND_ADDR";
pub const PORT_VAR: &str = "DARKSTAR_PORT";

const DEFAULT_CONFIG_PATH: &str = "config/darkstar.toml";

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
    pub fn discover_config_path() -> PathBuf {
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                tracing::debug!("Using config path from {}: {}", CONFIG_PATH_VAR, path);
                PathBuf::from(path)
            }
            Err(_) => PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Loads the discovered file, or defaults when there is none, then
    /// applies the environment overrides and validates the result
    pub fn load_default() -> ConfigLoadResult<GatewayConfig> {
        let path = Self::discover_config_path();

        let config = if path.exists() {
            Self::load(&path)?
        } else {
            tracing::info!("No config file at {}, using defaults", path.display());
            GatewayConfig::default()
        };

        let config = apply_overrides(
            config,
            std::env::var(BIND_ADDR_VAR).ok(),
            std::env::var(PORT_VAR).ok(),
        );
        config.validate().map_err(ConfigLoadError::InvalidConfig)?;

        Ok(config)
    }

    pub fn load(path: &Path) -> ConfigLoadResult<GatewayConfig> {
        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> ConfigLoadResult<GatewayConfig> {
        let mut value: toml::Value = toml::from_str(content)?;

        interpolate_toml(&mut value)?;

        let config: GatewayConfig = value.try_into().map_err(|e| {
            ConfigLoadError::InvalidConfig(format!("Failed to deserialize config: {}", e))
        })?;

        tracing::debug!(
            bind_addr = %config.server.bind_addr,
            overrides = config.providers.len(),
            "Loaded config"
        );

        Ok(config)
    }
}

/// `bind_addr` replaces the whole address, `port` only its port
fn apply_overrides(
    mut config: GatewayConfig, bind_addr: Option<String>, port: Option<String>,
) -> GatewayConfig {
    if let Some(bind_addr) = bind_addr {
        config.server.bind_addr = bind_addr;
    }

    if let Some(port) = port {
        let host = config
            .server
            .bind_addr
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or(config.server.bind_addr.as_str());
        config.server.bind_addr = format!("{host}:{port}");
    }

    config
}
