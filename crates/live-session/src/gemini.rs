//! Gemini Live websocket session.
//!
//! One socket per connect. A writer task drains an unbounded queue into the
//! sink so `send` stays synchronous; a reader task decodes server messages,
//! flips state on `setupComplete` and close, and fans out tool calls and
//! model text. No tool responses are sent back.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};
use url::Url;

use voicecart_core_types::{TextPart, ToolCallBatch};

use crate::config::SessionConfig;
use crate::errors::SessionError;
use crate::session::{LiveSession, SessionState};
use crate::wire::{self, ServerMessage};

pub const DEFAULT_ENDPOINT: &str = "wss://generativelanguage.googleapis.com/ws/google.ai.generativelanguage.v1alpha.GenerativeService.BidiGenerateContent";

const SETUP_TIMEOUT: Duration = Duration::from_secs(15);

struct Shared {
    state_tx: watch::Sender<SessionState>,
    tool_calls: broadcast::Sender<ToolCallBatch>,
    model_text: broadcast::Sender<String>,
}

pub struct GeminiLiveSession {
    endpoint: String,
    api_key: Option<String>,
    config: Mutex<Option<SessionConfig>>,
    outgoing: Mutex<Option<mpsc::UnboundedSender<Message>>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    shared: Arc<Shared>,
}

impl GeminiLiveSession {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Arc<Self> {
        let (state_tx, _) = watch::channel(SessionState::Disconnected);
        let (tool_calls, _) = broadcast::channel(64);
        let (model_text, _) = broadcast::channel(256);
        Arc::new(Self {
            endpoint: endpoint.into(),
            api_key,
            config: Mutex::new(None),
            outgoing: Mutex::new(None),
            tasks: Mutex::new(Vec::new()),
            shared: Arc::new(Shared {
                state_tx,
                tool_calls,
                model_text,
            }),
        })
    }

    /// Model text chunks, in arrival order.
    pub fn subscribe_text(&self) -> broadcast::Receiver<String> {
        self.shared.model_text.subscribe()
    }

    fn url(&self) -> Result<Url, SessionError> {
        let mut url = Url::parse(&self.endpoint).map_err(|err| SessionError::Connect {
            url: self.endpoint.clone(),
            reason: err.to_string(),
        })?;
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    /// Drop the writer queue and abort transport tasks, including ones left
    /// behind when the server closed the socket.
    fn clear_transport(&self) {
        self.outgoing.lock().take();
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
    }

    fn enqueue(&self, payload: &Value) -> bool {
        let guard = self.outgoing.lock();
        let Some(tx) = guard.as_ref() else {
            return false;
        };
        tx.send(Message::Text(payload.to_string().into())).is_ok()
    }

    async fn read_loop<S>(mut reader: S, shared: Arc<Shared>)
    where
        S: futures::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
    {
        while let Some(frame) = reader.next().await {
            let raw = match frame {
                Ok(Message::Text(text)) => text.to_string(),
                // Live responses frequently arrive as binary JSON.
                Ok(Message::Binary(bytes)) => match String::from_utf8(bytes.to_vec()) {
                    Ok(text) => text,
                    Err(_) => continue,
                },
                Ok(Message::Close(frame)) => {
                    info!(?frame, "live session closed by server");
                    break;
                }
                Ok(_) => continue,
                Err(err) => {
                    warn!(error = %err, "live session read error");
                    break;
                }
            };

            match ServerMessage::parse(&raw) {
                Ok(ServerMessage::SetupComplete) => {
                    info!("live session setup complete");
                    shared.state_tx.send_replace(SessionState::Connected);
                }
                Ok(ServerMessage::ToolCall(batch)) => {
                    debug!(calls = batch.len(), "tool call batch received");
                    let _ = shared.tool_calls.send(batch);
                }
                Ok(ServerMessage::ModelText(text)) => {
                    let _ = shared.model_text.send(text);
                }
                Ok(ServerMessage::TurnComplete) | Ok(ServerMessage::Interrupted) => {
                    debug!("model turn ended");
                }
                Ok(ServerMessage::Other) => {}
                Err(err) => warn!(%err, "skipping undecodable server message"),
            }
        }
        shared.state_tx.send_replace(SessionState::Disconnected);
    }
}

#[async_trait]
impl LiveSession for GeminiLiveSession {
    fn set_config(&self, config: SessionConfig) {
        *self.config.lock() = Some(config);
    }

    async fn connect(&self) -> Result<(), SessionError> {
        if self.state() != SessionState::Disconnected {
            return Ok(());
        }
        self.clear_transport();
        let config = self
            .config
            .lock()
            .clone()
            .ok_or(SessionError::NotConfigured)?;
        let url = self.url()?;

        self.shared.state_tx.send_replace(SessionState::Connecting);
        info!(endpoint = %self.endpoint, model = %config.model, "connecting live session");

        let (socket, _) = match tokio_tungstenite::connect_async(url.as_str()).await {
            Ok(pair) => pair,
            Err(err) => {
                self.shared.state_tx.send_replace(SessionState::Disconnected);
                return Err(SessionError::Connect {
                    url: self.endpoint.clone(),
                    reason: err.to_string(),
                });
            }
        };
        let (mut sink, stream) = socket.split();

        let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
        let writer = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                if let Err(err) = sink.send(message).await {
                    warn!(error = %err, "live session write failed");
                    break;
                }
            }
            let _ = sink.close().await;
        });
        let reader = tokio::spawn(Self::read_loop(stream, self.shared.clone()));
        {
            let mut tasks = self.tasks.lock();
            tasks.push(writer);
            tasks.push(reader);
        }
        *self.outgoing.lock() = Some(tx);

        self.enqueue(&wire::setup_message(&config));

        let mut state = self.shared.state_tx.subscribe();
        let settled = tokio::time::timeout(
            SETUP_TIMEOUT,
            state.wait_for(|state| *state != SessionState::Connecting),
        )
        .await
        .map(|changed| changed.map(|current| *current));
        match settled {
            Ok(Ok(current)) if current.is_connected() => Ok(()),
            Ok(_) => {
                self.disconnect().await;
                Err(SessionError::Closed)
            }
            Err(_) => {
                self.disconnect().await;
                Err(SessionError::Protocol("no setupComplete from server".into()))
            }
        }
    }

    async fn disconnect(&self) {
        self.clear_transport();
        if self.shared.state_tx.send_replace(SessionState::Disconnected) != SessionState::Disconnected {
            info!("live session disconnected");
        }
    }

    fn state(&self) -> SessionState {
        *self.shared.state_tx.borrow()
    }

    fn watch_state(&self) -> watch::Receiver<SessionState> {
        self.shared.state_tx.subscribe()
    }

    fn send(&self, parts: Vec<TextPart>) {
        if !self.enqueue(&wire::client_content(&parts)) {
            debug!(parts = parts.len(), "dropping send; session not open");
        }
    }

    fn subscribe_tool_calls(&self) -> broadcast::Receiver<ToolCallBatch> {
        self.shared.tool_calls.subscribe()
    }
}
