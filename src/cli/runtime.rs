use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

pub fn init_logging(level: &str, debug: bool, json: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string()));

    // stdout carries command output; logs go to stderr.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
    pub found: bool,
}

pub fn default_config_path() -> Result<PathBuf> {
    // Priority: ./config/voicecart.yaml > ~/.config/voicecart/config.yaml
    let local_config = PathBuf::from("config/voicecart.yaml");
    if local_config.exists() {
        return Ok(local_config);
    }
    let mut path = dirs::config_dir().context("Failed to get config directory")?;
    path.push("voicecart");
    path.push("config.yaml");
    Ok(path)
}

pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let config_path = match config_path {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };

    let (mut config, found) = if fs::try_exists(&config_path).await.unwrap_or(false) {
        let content = fs::read_to_string(&config_path)
            .await
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
        info!("Loaded configuration from: {}", config_path.display());
        (config, true)
    } else {
        warn!(
            "Config file not found, using defaults: {}",
            config_path.display()
        );
        (Config::default(), false)
    };

    config.apply_env_overrides();
    Ok(LoadedConfig {
        config,
        path: config_path,
        found,
    })
}
