use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;

pub struct CliContext {
    config: Arc<Config>,
    config_path: PathBuf,
    config_found: bool,
}

impl CliContext {
    pub fn new(config: Config, config_path: PathBuf, config_found: bool) -> Self {
        Self {
            config: Arc::new(config),
            config_path,
            config_found,
        }
    }

    pub fn config(&self) -> &Config {
        self.config.as_ref()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Whether `config_path` existed when the CLI started.
    pub fn config_found(&self) -> bool {
        self.config_found
    }
}
