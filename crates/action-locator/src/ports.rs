//! Capability the locator needs from the rendered page.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use voicecart_core_types::AssistError;

/// Opaque handle to a live element, valid until the next re-render.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NodeRef(pub String);

/// What the locator can observe about an element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub node: NodeRef,
    /// Rendered label text (for shipping options, the method label).
    pub label: String,
    pub enabled: bool,
    pub value: Option<String>,
    pub selected: bool,
}

#[async_trait]
pub trait UiPort: Send + Sync {
    /// All elements currently matching `selector`, in document order.
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementSnapshot>, AssistError>;

    /// Fresh view of a previously queried element; `None` once it is gone.
    async fn snapshot(&self, node: &NodeRef) -> Result<Option<ElementSnapshot>, AssistError>;

    async fn click(&self, node: &NodeRef) -> Result<(), AssistError>;

    async fn set_value(&self, node: &NodeRef, value: &str) -> Result<(), AssistError>;

    /// Raise a bubbling change notification so owning UI state re-reads the value.
    async fn dispatch_change(&self, node: &NodeRef) -> Result<(), AssistError>;
}
