//! UI Affordance Locator
//!
//! Resolves logical control names ("size option M", "shipping field: city")
//! to live elements through a [`UiPort`] and activates them:
//! - enumerable choices match exact rendered label text from a closed allow-list
//! - disabled controls report `Disabled` and are never activated
//! - free-text fields get their value set plus a change notification
//! - gated follow-ups can be scheduled after a settle delay
//!
//! Nothing is cached between calls; the page may re-render at any time.

pub mod affordance;
pub mod errors;
pub mod memory;
pub mod ports;
pub mod resolver;
pub mod types;

pub use affordance::{Affordance, AffordanceKind, LabelMatch, Marker};
pub use errors::LocatorError;
pub use memory::{ClickHook, ElementSpec, InMemoryPage};
pub use ports::{ElementSnapshot, NodeRef, UiPort};
pub use resolver::AffordanceLocator;
pub use types::{ActivationReport, ActivationResult, ResolvedAffordance};
