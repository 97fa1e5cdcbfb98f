//! Session configuration sent to the model before connecting.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use voicecart_action_schema::Declaration;

pub const DEFAULT_MODEL: &str = "models/gemini-2.0-flash-exp";
pub const DEFAULT_VOICE: &str = "Aoede";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseModality {
    #[default]
    Audio,
    Text,
}

impl ResponseModality {
    pub fn wire(self) -> &'static str {
        match self {
            ResponseModality::Audio => "AUDIO",
            ResponseModality::Text => "TEXT",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(default)]
    pub response_modality: ResponseModality,
    #[serde(default = "default_voice")]
    pub voice: String,
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            response_modality: ResponseModality::default(),
            voice: default_voice(),
        }
    }
}

impl GenerationOptions {
    pub fn text() -> Self {
        Self {
            response_modality: ResponseModality::Text,
            ..Self::default()
        }
    }

    pub fn to_wire(&self) -> Value {
        json!({
            "responseModalities": [self.response_modality.wire()],
            "speechConfig": {
                "voiceConfig": {
                    "prebuiltVoiceConfig": { "voiceName": self.voice }
                }
            }
        })
    }
}

/// Everything the model is told before the session opens.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub model: String,
    pub tools: Value,
    pub system_instruction: Value,
    pub generation_config: GenerationOptions,
}

impl SessionConfig {
    pub fn from_declaration(
        model: impl Into<String>,
        declaration: &Declaration,
        generation_config: GenerationOptions,
    ) -> Self {
        Self {
            model: model.into(),
            tools: declaration.tools_wire(),
            system_instruction: declaration.system_instruction_wire(),
            generation_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voicecart_action_schema::declare;

    #[test]
    fn generation_options_carry_prebuilt_voice() {
        let wire = GenerationOptions::default().to_wire();
        assert_eq!(wire["responseModalities"], json!(["AUDIO"]));
        assert_eq!(
            wire["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
            "Aoede"
        );
    }

    #[test]
    fn config_embeds_the_declared_tools() {
        let config = SessionConfig::from_declaration(
            DEFAULT_MODEL,
            declare(),
            GenerationOptions::text(),
        );
        assert_eq!(config.tools, declare().tools_wire());
        assert_eq!(config.generation_config.response_modality, ResponseModality::Text);
    }
}
