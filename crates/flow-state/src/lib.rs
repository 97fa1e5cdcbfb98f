//! Cross-flow state machine.
//!
//! The rewards negotiation and the login wait are modelled as one explicit
//! [`FlowState`] value moved only by [`transition`]. Transitions are pure and
//! return the [`Effect`]s the runtime must perform; [`FlowCenter`] holds the
//! live state for a mount and keeps a bounded transition history.

mod center;
mod effect;
pub mod event;
pub mod state;
mod transition;

pub use center::{FlowCenter, FlowRecord, FlowStats};
pub use effect::{Effect, PromptButton, Script};
pub use event::FlowEvent;
pub use state::{FlowCtx, FlowState, PendingFlow};
pub use transition::{transition, Transition};
