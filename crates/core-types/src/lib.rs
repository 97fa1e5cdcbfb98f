//! Shared primitives for the VoiceCart assistant crates.
//!
//! Holds the workspace-wide error, the identifiers and tool-call shapes that
//! travel between the live session and the dispatcher, and the closed
//! storefront catalog every other crate agrees on.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod catalog;
pub mod route;

pub use catalog::{
    Fit, Inseam, PersonalizedCategory, ProductId, Route, ShippingField, ShippingMethod, Size,
};
pub use route::RouteContext;

/// Shared error type for the assistant crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssistError {
    #[error("{message}")]
    Message { message: String },
    #[error("session is not connected")]
    NotConnected,
    #[error("operation cancelled")]
    Cancelled,
}

impl AssistError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier attached to a single tool call for tracing.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CallId(pub String);

impl CallId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, argument-bearing instruction emitted by the model.
///
/// `args` is whatever JSON object the model produced; it is only trusted once
/// the schema registry has turned it into a typed action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub id: Option<CallId>,
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            id: None,
            name: name.into(),
            args,
        }
    }

    pub fn with_id(mut self, id: CallId) -> Self {
        self.id = Some(id);
        self
    }

    /// Id used in logs; generated when the session did not supply one.
    pub fn trace_id(&self) -> CallId {
        self.id.clone().unwrap_or_default()
    }
}

/// One "tool call" notification from the session, in arrival order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCallBatch {
    pub calls: Vec<ToolCall>,
}

impl ToolCallBatch {
    pub fn new(calls: Vec<ToolCall>) -> Self {
        Self { calls }
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }
}

impl From<Vec<ToolCall>> for ToolCallBatch {
    fn from(calls: Vec<ToolCall>) -> Self {
        Self::new(calls)
    }
}

/// A text part of an outgoing session message.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TextPart {
    pub text: String,
}

impl TextPart {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_call_deserializes_without_id_or_args() {
        let call: ToolCall = serde_json::from_value(json!({ "name": "clickContinue" })).unwrap();
        assert_eq!(call.name, "clickContinue");
        assert!(call.id.is_none());
        assert!(call.args.is_null());
    }

    #[test]
    fn trace_id_prefers_session_supplied_id() {
        let call = ToolCall::new("navigate", json!({})).with_id(CallId("fc-1".into()));
        assert_eq!(call.trace_id(), CallId("fc-1".into()));
    }
}
