//! In-process session that records what it is told.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};
use tracing::debug;

use voicecart_core_types::{TextPart, ToolCallBatch};

use crate::config::SessionConfig;
use crate::errors::SessionError;
use crate::session::{LiveSession, SessionState};

#[derive(Default)]
struct Recorded {
    configs: Vec<SessionConfig>,
    sent: Vec<Vec<TextPart>>,
    connects: usize,
}

/// A [`LiveSession`] with no model behind it. Tool-call batches are injected
/// by the caller; every send is recorded, connected or not.
pub struct LoopbackSession {
    state_tx: watch::Sender<SessionState>,
    tool_calls: broadcast::Sender<ToolCallBatch>,
    recorded: Mutex<Recorded>,
}

impl LoopbackSession {
    pub fn new() -> Arc<Self> {
        let (state_tx, _) = watch::channel(SessionState::Disconnected);
        let (tool_calls, _) = broadcast::channel(64);
        Arc::new(Self {
            state_tx,
            tool_calls,
            recorded: Mutex::new(Recorded::default()),
        })
    }

    /// Deliver a batch as if the model emitted it. Returns the number of
    /// subscribers that received it.
    pub fn inject(&self, batch: impl Into<ToolCallBatch>) -> usize {
        self.tool_calls.send(batch.into()).unwrap_or(0)
    }

    /// Simulate the remote end dropping the connection.
    pub fn drop_connection(&self) {
        self.state_tx.send_replace(SessionState::Disconnected);
    }

    pub fn sent(&self) -> Vec<Vec<TextPart>> {
        self.recorded.lock().sent.clone()
    }

    /// Sent texts flattened in order.
    pub fn sent_texts(&self) -> Vec<String> {
        self.recorded
            .lock()
            .sent
            .iter()
            .flatten()
            .map(|part| part.text.clone())
            .collect()
    }

    pub fn clear_sent(&self) {
        self.recorded.lock().sent.clear();
    }

    pub fn configs(&self) -> Vec<SessionConfig> {
        self.recorded.lock().configs.clone()
    }

    pub fn connect_count(&self) -> usize {
        self.recorded.lock().connects
    }

    pub fn tool_call_subscribers(&self) -> usize {
        self.tool_calls.receiver_count()
    }
}

#[async_trait]
impl LiveSession for LoopbackSession {
    fn set_config(&self, config: SessionConfig) {
        self.recorded.lock().configs.push(config);
    }

    async fn connect(&self) -> Result<(), SessionError> {
        if self.recorded.lock().configs.is_empty() {
            return Err(SessionError::NotConfigured);
        }
        self.recorded.lock().connects += 1;
        self.state_tx.send_replace(SessionState::Connecting);
        tokio::task::yield_now().await;
        self.state_tx.send_replace(SessionState::Connected);
        Ok(())
    }

    async fn disconnect(&self) {
        self.state_tx.send_replace(SessionState::Disconnected);
    }

    fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    fn watch_state(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    fn send(&self, parts: Vec<TextPart>) {
        debug!(parts = parts.len(), state = %self.state(), "loopback send");
        self.recorded.lock().sent.push(parts);
    }

    fn subscribe_tool_calls(&self) -> broadcast::Receiver<ToolCallBatch> {
        self.tool_calls.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenerationOptions, DEFAULT_MODEL};
    use voicecart_action_schema::declare;

    fn config() -> SessionConfig {
        SessionConfig::from_declaration(DEFAULT_MODEL, declare(), GenerationOptions::default())
    }

    #[tokio::test]
    async fn connect_requires_configuration() {
        let session = LoopbackSession::new();
        assert!(matches!(
            session.connect().await,
            Err(SessionError::NotConfigured)
        ));
        session.set_config(config());
        session.connect().await.unwrap();
        assert_eq!(session.state(), SessionState::Connected);
    }

    #[tokio::test]
    async fn injected_batches_reach_subscribers() {
        let session = LoopbackSession::new();
        let mut rx = session.subscribe_tool_calls();
        assert_eq!(session.inject(ToolCallBatch::default()), 1);
        assert!(rx.recv().await.unwrap().is_empty());
        drop(rx);
        assert_eq!(session.tool_call_subscribers(), 0);
    }
}
