//! Action Schema Registry.
//!
//! The registry is the single source for which actions exist: the same data
//! is rendered into the function declarations sent to the model and used to
//! validate every incoming tool call before it is routed.

pub mod action;
pub mod errors;
pub mod model;
pub mod registry;

pub use action::Action;
pub use errors::SchemaError;
pub use model::{ActionName, ActionSchema, ParamSpec, ParamType};
pub use registry::{declare, Declaration, SYSTEM_INSTRUCTION};
