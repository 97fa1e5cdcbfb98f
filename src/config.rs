//! CLI configuration file.
//!
//! Every section has defaults so an absent or partial file is valid.
//! Environment variables win over the file for the model, voice and key.

use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use voicecart_dispatcher::AssistantSettings;
use voicecart_live_session::{
    GenerationOptions, ResponseModality, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_VOICE,
};

pub const ENV_MODEL: &str = "VOICECART_MODEL";
pub const ENV_VOICE: &str = "VOICECART_VOICE";
pub const ENV_API_KEY: &str = "VOICECART_API_KEY";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("session.{0} must not be empty")]
    Empty(&'static str),
    #[error("session.endpoint must be a ws:// or wss:// url, got {0}")]
    Endpoint(String),
    #[error("assistant.{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: SessionSettings,
    pub assistant: AssistantSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub model: String,
    pub voice: String,
    pub response_modality: ResponseModality,
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            voice: DEFAULT_VOICE.to_string(),
            response_modality: ResponseModality::default(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
        }
    }
}

impl SessionSettings {
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            response_modality: self.response_modality,
            voice: self.voice.clone(),
        }
    }
}

impl Config {
    /// Apply `VOICECART_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| env::var(key).ok());
    }

    pub(crate) fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(model) = non_empty(ENV_MODEL) {
            debug!(%model, "model overridden from environment");
            self.session.model = model;
        }
        if let Some(voice) = non_empty(ENV_VOICE) {
            debug!(%voice, "voice overridden from environment");
            self.session.voice = voice;
        }
        if let Some(key) = non_empty(ENV_API_KEY).or_else(|| non_empty(ENV_GEMINI_API_KEY)) {
            self.session.api_key = Some(key);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.model.trim().is_empty() {
            return Err(ConfigError::Empty("model"));
        }
        if self.session.voice.trim().is_empty() {
            return Err(ConfigError::Empty("voice"));
        }
        let endpoint = self.session.endpoint.as_str();
        if !(endpoint.starts_with("wss://") || endpoint.starts_with("ws://")) {
            return Err(ConfigError::Endpoint(endpoint.to_string()));
        }
        if self.assistant.settle_ms == 0 {
            return Err(ConfigError::ZeroDuration("settle_ms"));
        }
        if self.assistant.login_poll_ms == 0 {
            return Err(ConfigError::ZeroDuration("login_poll_ms"));
        }
        Ok(())
    }
}
