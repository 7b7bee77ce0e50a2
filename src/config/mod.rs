mod types;

pub use types::*;

use crate::Result;
use std::{env, path::Path};
use tracing::debug;

/// Loads `CONFIG_PATH` (default `config.yaml`), applies environment
/// overrides and validates the result.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let config = load_from(&config_path, |name| env::var(name).ok()).await?;
    config.validate()?;
    Ok(config)
}

/// Reads the YAML file if present and layers `lookup` overrides on top.
///
/// A missing file is not an error; every field has a default except the key.
pub async fn load_from<F>(config_path: impl AsRef<Path>, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let config_path = config_path.as_ref();
    debug!("Loading configuration from: {}", config_path.display());

    let mut config = if tokio::fs::try_exists(config_path).await? {
        let config_str = tokio::fs::read_to_string(config_path).await?;
        serde_yaml::from_str(&config_str)?
    } else {
        debug!("No configuration file found, using defaults");
        Config::default()
    };

    config.apply_env_overrides(lookup)?;
    Ok(config)
}
