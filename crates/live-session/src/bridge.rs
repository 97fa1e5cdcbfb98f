//! Session lifecycle policy: configuration and the one-time greeting.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use voicecart_action_schema::Declaration;
use voicecart_core_types::TextPart;

use crate::config::{GenerationOptions, SessionConfig};
use crate::errors::SessionError;
use crate::session::{LiveSession, SessionState};

pub const GREETING: &str = "Greet the user saying 'Hi! how can i help you today?'";

/// Owns the session handle for one mount.
///
/// "Have greeted" is tracked apart from connection state so reconnect churn
/// within the mount never greets twice.
pub struct SessionBridge {
    session: Arc<dyn LiveSession>,
    greeted: AtomicBool,
}

impl SessionBridge {
    pub fn new(session: Arc<dyn LiveSession>) -> Self {
        Self {
            session,
            greeted: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &Arc<dyn LiveSession> {
        &self.session
    }

    pub fn configure(
        &self,
        model: &str,
        declaration: &Declaration,
        options: GenerationOptions,
    ) -> SessionConfig {
        let config = SessionConfig::from_declaration(model, declaration, options);
        debug!(model, actions = declaration.schema.len(), "configuring session");
        self.session.set_config(config.clone());
        config
    }

    /// React to a state change. Returns true if the greeting was sent.
    pub fn on_state(&self, state: SessionState) -> bool {
        if !state.is_connected() {
            return false;
        }
        if self.greeted.swap(true, Ordering::SeqCst) {
            return false;
        }
        info!("session connected; greeting user");
        self.session.send(vec![TextPart::new(GREETING)]);
        true
    }

    pub fn has_greeted(&self) -> bool {
        self.greeted.load(Ordering::SeqCst)
    }

    pub fn is_connected(&self) -> bool {
        self.session.state().is_connected()
    }

    /// Connect unless already connected.
    pub async fn ensure_connected(&self) -> Result<(), SessionError> {
        if self.is_connected() {
            return Ok(());
        }
        info!("session not connected; connecting");
        self.session.connect().await
    }

    pub fn say(&self, text: &str) {
        self.session.send(vec![TextPart::new(text)]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MODEL;
    use crate::loopback::LoopbackSession;
    use voicecart_action_schema::declare;

    #[tokio::test]
    async fn greets_once_across_reconnects() {
        let session = LoopbackSession::new();
        let bridge = SessionBridge::new(session.clone());
        bridge.configure(DEFAULT_MODEL, declare(), GenerationOptions::default());

        assert!(!bridge.on_state(SessionState::Connecting));
        assert!(bridge.on_state(SessionState::Connected));
        assert!(!bridge.on_state(SessionState::Disconnected));
        assert!(!bridge.on_state(SessionState::Connected));

        assert_eq!(session.sent_texts(), vec![GREETING.to_string()]);
    }

    #[tokio::test]
    async fn reconfiguring_is_idempotent() {
        let session = LoopbackSession::new();
        let bridge = SessionBridge::new(session.clone());
        let first = bridge.configure(DEFAULT_MODEL, declare(), GenerationOptions::default());
        let second = bridge.configure(DEFAULT_MODEL, declare(), GenerationOptions::default());
        assert_eq!(first, second);
        assert_eq!(session.configs().len(), 2);
    }

    #[tokio::test]
    async fn ensure_connected_connects_only_when_needed() {
        let session = LoopbackSession::new();
        let bridge = SessionBridge::new(session.clone());
        bridge.configure(DEFAULT_MODEL, declare(), GenerationOptions::default());

        bridge.ensure_connected().await.unwrap();
        bridge.ensure_connected().await.unwrap();
        assert_eq!(session.connect_count(), 1);
    }
}
