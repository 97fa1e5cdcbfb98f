//! Tool-call dispatcher and assistant runtime.
//!
//! [`ToolCallDispatcher`] validates each tool call against the action schema
//! and routes it to the affordance locator, the navigator or the cross-flow
//! state machine, speaking scripted confirmations through the session.
//! [`NavAssistant`] wires the dispatcher to its asynchronous sources for the
//! lifetime of one mount.

pub mod assistant;
pub mod dispatcher;
pub mod error;
pub mod flow;
pub mod navigation;
pub mod replies;
pub mod settings;

pub use assistant::NavAssistant;
pub use dispatcher::{
    DispatchOutcome, DispatchRecord, ToolCallDispatcher, ToolCallDispatcherBuilder,
};
pub use error::DispatchError;
pub use flow::FlowDriver;
pub use navigation::{MemoryRouter, Navigator, RouteObserver};
pub use settings::AssistantSettings;
