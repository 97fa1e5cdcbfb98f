//! In-memory page for tests and scripted replays.
//!
//! Elements are matched by exact selector string. Choices belong to a group
//! (their base selector); clicking one makes it the group's only selected
//! element and exposes it under `{group}.selected`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use voicecart_core_types::{AssistError, Fit, ShippingField, ShippingMethod, Size};

use crate::affordance::Marker;
use crate::ports::{ElementSnapshot, NodeRef, UiPort};

/// Callback fired after a matching element is clicked.
pub type ClickHook = Arc<dyn Fn(&ElementSnapshot) + Send + Sync>;

#[derive(Clone, Debug)]
pub struct ElementSpec {
    pub selectors: Vec<String>,
    pub label: String,
    pub enabled: bool,
    pub value: Option<String>,
    pub group: Option<String>,
}

impl ElementSpec {
    pub fn button(selector: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            selectors: vec![selector.into()],
            label: label.into(),
            enabled: true,
            value: None,
            group: None,
        }
    }

    pub fn choice(selector: impl Into<String>, label: impl Into<String>) -> Self {
        let selector = selector.into();
        Self {
            selectors: vec![selector.clone()],
            label: label.into(),
            enabled: true,
            value: None,
            group: Some(selector),
        }
    }

    pub fn input(selector: impl Into<String>) -> Self {
        Self {
            selectors: vec![selector.into()],
            label: String::new(),
            enabled: true,
            value: Some(String::new()),
            group: None,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn also_matching(mut self, selector: impl Into<String>) -> Self {
        self.selectors.push(selector.into());
        self
    }
}

#[derive(Clone, Debug)]
struct Element {
    node: NodeRef,
    spec: ElementSpec,
    selected: bool,
}

impl Element {
    fn matches(&self, selector: &str) -> bool {
        if self.spec.selectors.iter().any(|s| s == selector) {
            return true;
        }
        match &self.spec.group {
            Some(group) => self.selected && selector == format!("{group}.selected"),
            None => false,
        }
    }

    fn snapshot(&self) -> ElementSnapshot {
        ElementSnapshot {
            node: self.node.clone(),
            label: self.spec.label.clone(),
            enabled: self.spec.enabled,
            value: self.spec.value.clone(),
            selected: self.selected,
        }
    }
}

#[derive(Default)]
struct PageInner {
    elements: Vec<Element>,
    next_id: u64,
    clicks: Vec<ElementSnapshot>,
    values: Vec<(NodeRef, String)>,
    changes: usize,
    hooks: HashMap<String, ClickHook>,
}

/// A [`UiPort`] over a mutable list of elements.
#[derive(Default)]
pub struct InMemoryPage {
    inner: Mutex<PageInner>,
}

impl InMemoryPage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every control the assistant can reach, as rendered on a product page
    /// with the checkout panels open.
    pub fn storefront() -> Arc<Self> {
        let page = Self::new();
        page.insert(ElementSpec::button(".add-to-bag", "Add to Bag"));
        for fit in Fit::ALL {
            page.insert(ElementSpec::choice(".fit-option", fit.as_str()));
        }
        for size in Size::ALL {
            page.insert(ElementSpec::choice(".size-option", format!(" {} ", size.as_str())));
        }
        for field in ShippingField::ALL {
            page.insert(ElementSpec::input(format!(
                "input[placeholder=\"{}\"]",
                field.placeholder()
            )));
        }
        for method in ShippingMethod::ALL {
            page.insert(ElementSpec::choice(".shipping-option", method.as_str()));
        }
        page.insert(ElementSpec::button(".continue-btn", "Continue"));
        page.insert(ElementSpec::input("#phone"));
        page.insert(ElementSpec::button(
            ".phone-input-row button[type=\"submit\"]",
            "Send Code",
        ));
        page.insert(ElementSpec::input("#code"));
        page.insert(ElementSpec::button(
            ".verification-code-row button[type=\"submit\"]",
            "Verify",
        ));
        page.insert(ElementSpec::button(".send-link-btn", "Send Link"));
        page.insert(ElementSpec::button(".wallet-pay-btn", "Pay"));
        page.insert(ElementSpec::button(".rewards-unlock-btn", "Unlock Rewards"));
        page
    }

    pub fn insert(&self, spec: ElementSpec) -> NodeRef {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let node = NodeRef(format!("node-{}", inner.next_id));
        inner.elements.push(Element {
            node: node.clone(),
            spec,
            selected: false,
        });
        node
    }

    /// Removes every element matching `selector`; returns how many went.
    pub fn remove(&self, selector: &str) -> usize {
        let mut inner = self.inner.lock();
        let before = inner.elements.len();
        inner.elements.retain(|el| !el.matches(selector));
        before - inner.elements.len()
    }

    pub fn set_enabled(&self, selector: &str, enabled: bool) {
        let mut inner = self.inner.lock();
        for el in inner.elements.iter_mut().filter(|el| el.matches(selector)) {
            el.spec.enabled = enabled;
        }
    }

    /// Render the rewards yes/no prompt.
    pub fn show_rewards_prompt(&self) {
        self.insert(ElementSpec::button(".rewards-prompt button:first-child", "Yes"));
        self.insert(ElementSpec::button(".rewards-prompt button:last-child", "No"));
    }

    /// Render the signed-in header marker.
    pub fn login(&self) {
        self.insert(ElementSpec::button(Marker::LoggedIn.selector(), "Account"));
    }

    pub fn set_click_hook(&self, selector: impl Into<String>, hook: ClickHook) {
        self.inner.lock().hooks.insert(selector.into(), hook);
    }

    pub fn clicks(&self) -> Vec<ElementSnapshot> {
        self.inner.lock().clicks.clone()
    }

    pub fn clicked_labels(&self) -> Vec<String> {
        self.inner
            .lock()
            .clicks
            .iter()
            .map(|el| el.label.trim().to_string())
            .collect()
    }

    /// Values written through `set_value`, in order.
    pub fn values(&self) -> Vec<(NodeRef, String)> {
        self.inner.lock().values.clone()
    }

    pub fn value_of(&self, selector: &str) -> Option<String> {
        let inner = self.inner.lock();
        inner
            .elements
            .iter()
            .find(|el| el.matches(selector))
            .and_then(|el| el.spec.value.clone())
    }

    pub fn change_notifications(&self) -> usize {
        self.inner.lock().changes
    }

    pub fn find_by_label(&self, selector: &str, label: &str) -> Option<ElementSnapshot> {
        let inner = self.inner.lock();
        inner
            .elements
            .iter()
            .filter(|el| el.matches(selector))
            .find(|el| el.spec.label.trim() == label)
            .map(Element::snapshot)
    }

    fn missing(node: &NodeRef) -> AssistError {
        AssistError::new(format!("node {} is detached", node.0))
    }
}

#[async_trait]
impl UiPort for InMemoryPage {
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementSnapshot>, AssistError> {
        let inner = self.inner.lock();
        Ok(inner
            .elements
            .iter()
            .filter(|el| el.matches(selector))
            .map(Element::snapshot)
            .collect())
    }

    async fn snapshot(&self, node: &NodeRef) -> Result<Option<ElementSnapshot>, AssistError> {
        let inner = self.inner.lock();
        Ok(inner
            .elements
            .iter()
            .find(|el| &el.node == node)
            .map(Element::snapshot))
    }

    async fn click(&self, node: &NodeRef) -> Result<(), AssistError> {
        // Hooks run outside the lock so they may mutate the page.
        let (clicked, hooks) = {
            let mut inner = self.inner.lock();
            let index = inner
                .elements
                .iter()
                .position(|el| &el.node == node)
                .ok_or_else(|| Self::missing(node))?;

            if let Some(group) = inner.elements[index].spec.group.clone() {
                for el in inner.elements.iter_mut() {
                    if el.spec.group.as_deref() == Some(group.as_str()) {
                        el.selected = false;
                    }
                }
                inner.elements[index].selected = true;
            }

            let element = inner.elements[index].clone();
            let clicked = element.snapshot();
            inner.clicks.push(clicked.clone());
            let hooks: Vec<ClickHook> = inner
                .hooks
                .iter()
                .filter(|(selector, _)| element.matches(selector))
                .map(|(_, hook)| hook.clone())
                .collect();
            (clicked, hooks)
        };

        for hook in hooks {
            hook(&clicked);
        }
        Ok(())
    }

    async fn set_value(&self, node: &NodeRef, value: &str) -> Result<(), AssistError> {
        let mut inner = self.inner.lock();
        let element = inner
            .elements
            .iter_mut()
            .find(|el| &el.node == node)
            .ok_or_else(|| Self::missing(node))?;
        element.spec.value = Some(value.to_string());
        inner.values.push((node.clone(), value.to_string()));
        Ok(())
    }

    async fn dispatch_change(&self, node: &NodeRef) -> Result<(), AssistError> {
        let mut inner = self.inner.lock();
        if !inner.elements.iter().any(|el| &el.node == node) {
            return Err(Self::missing(node));
        }
        inner.changes += 1;
        Ok(())
    }
}
