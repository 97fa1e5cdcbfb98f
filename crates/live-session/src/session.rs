//! The session capability.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};

use voicecart_core_types::{TextPart, ToolCallBatch};

use crate::config::SessionConfig;
use crate::errors::SessionError;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl SessionState {
    pub fn is_connected(self) -> bool {
        matches!(self, SessionState::Connected)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Disconnected => "disconnected",
            SessionState::Connecting => "connecting",
            SessionState::Connected => "connected",
        };
        f.write_str(name)
    }
}

/// A live bidirectional channel to the conversational model.
///
/// `send` never waits and never reports delivery; an implementation that is
/// not connected may buffer or drop. Tool calls are broadcast so that each
/// subscriber sees batches from the moment it subscribed; dropping the
/// receiver deregisters.
#[async_trait]
pub trait LiveSession: Send + Sync {
    /// Store configuration for the next connect. Safe to repeat.
    fn set_config(&self, config: SessionConfig);

    async fn connect(&self) -> Result<(), SessionError>;

    async fn disconnect(&self);

    fn state(&self) -> SessionState;

    fn watch_state(&self) -> watch::Receiver<SessionState>;

    fn send(&self, parts: Vec<TextPart>);

    fn subscribe_tool_calls(&self) -> broadcast::Receiver<ToolCallBatch>;
}
