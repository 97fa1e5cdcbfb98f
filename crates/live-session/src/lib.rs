//! Live conversational session.
//!
//! [`LiveSession`] is the capability the assistant needs from the model
//! connection: configuration, connect/disconnect, an observable
//! [`SessionState`], fire-and-forget text sends and a tool-call stream.
//! [`SessionBridge`] owns the lifecycle policy on top of it (configuration
//! and the one-time greeting). Two implementations ship here: an in-process
//! [`LoopbackSession`] and the websocket-backed [`GeminiLiveSession`].

pub mod bridge;
pub mod config;
pub mod errors;
pub mod gemini;
pub mod loopback;
pub mod session;
pub mod wire;

pub use bridge::{SessionBridge, GREETING};
pub use config::{GenerationOptions, ResponseModality, SessionConfig, DEFAULT_MODEL, DEFAULT_VOICE};
pub use errors::SessionError;
pub use gemini::{GeminiLiveSession, DEFAULT_ENDPOINT};
pub use loopback::LoopbackSession;
pub use session::{LiveSession, SessionState};
pub use wire::ServerMessage;
