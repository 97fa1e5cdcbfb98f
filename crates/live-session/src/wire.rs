//! Gemini Live (BidiGenerateContent) message codec.

use serde_json::{json, Value};

use voicecart_core_types::{CallId, TextPart, ToolCall, ToolCallBatch};

use crate::config::SessionConfig;
use crate::errors::SessionError;

/// First client message on a fresh socket.
pub fn setup_message(config: &SessionConfig) -> Value {
    json!({
        "setup": {
            "model": config.model,
            "generationConfig": config.generation_config.to_wire(),
            "systemInstruction": config.system_instruction,
            "tools": config.tools,
        }
    })
}

/// A complete user turn made of text parts.
pub fn client_content(parts: &[TextPart]) -> Value {
    let parts: Vec<Value> = parts.iter().map(|p| json!({ "text": p.text })).collect();
    json!({
        "clientContent": {
            "turns": [{ "role": "user", "parts": parts }],
            "turnComplete": true,
        }
    })
}

/// Server messages the assistant reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum ServerMessage {
    SetupComplete,
    ToolCall(ToolCallBatch),
    /// Model text from a content turn (text modality, or transcripts).
    ModelText(String),
    TurnComplete,
    Interrupted,
    /// Anything else (audio chunks, cancellations, usage metadata).
    Other,
}

impl ServerMessage {
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|err| SessionError::Protocol(format!("invalid server JSON: {err}")))?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        if value.get("setupComplete").is_some() {
            return ServerMessage::SetupComplete;
        }
        if let Some(tool_call) = value.get("toolCall") {
            return ServerMessage::ToolCall(parse_function_calls(tool_call));
        }
        if let Some(content) = value.get("serverContent") {
            if content.get("interrupted").and_then(Value::as_bool) == Some(true) {
                return ServerMessage::Interrupted;
            }
            let text: String = content
                .pointer("/modelTurn/parts")
                .and_then(Value::as_array)
                .map(|parts| {
                    parts
                        .iter()
                        .filter_map(|part| part.get("text").and_then(Value::as_str))
                        .collect()
                })
                .unwrap_or_default();
            if !text.is_empty() {
                return ServerMessage::ModelText(text);
            }
            if content.get("turnComplete").and_then(Value::as_bool) == Some(true) {
                return ServerMessage::TurnComplete;
            }
        }
        ServerMessage::Other
    }
}

fn parse_function_calls(tool_call: &Value) -> ToolCallBatch {
    let calls = tool_call
        .get("functionCalls")
        .and_then(Value::as_array)
        .map(|calls| {
            calls
                .iter()
                .filter_map(|call| {
                    let name = call.get("name")?.as_str()?;
                    let args = call.get("args").cloned().unwrap_or(Value::Null);
                    let mut parsed = ToolCall::new(name, args);
                    if let Some(id) = call.get("id").and_then(Value::as_str) {
                        parsed = parsed.with_id(CallId(id.to_string()));
                    }
                    Some(parsed)
                })
                .collect()
        })
        .unwrap_or_default();
    ToolCallBatch::new(calls)
}
