use thiserror::Error;

use voicecart_core_types::AssistError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("session has no configuration")]
    NotConfigured,

    #[error("failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("connection closed")]
    Closed,
}

impl From<SessionError> for AssistError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Closed => AssistError::NotConnected,
            other => AssistError::new(other.to_string()),
        }
    }
}
