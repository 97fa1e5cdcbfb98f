//! Core types for resolution and activation

use serde::{Deserialize, Serialize};

use voicecart_core_types::RouteContext;

use crate::affordance::Affordance;
use crate::ports::ElementSnapshot;

/// An affordance bound to a live element at resolution time.
#[derive(Clone, Debug)]
pub struct ResolvedAffordance {
    pub affordance: Affordance,

    /// Element chosen among the selector's matches
    pub element: ElementSnapshot,

    /// Number of elements that matched selector and label
    pub match_count: usize,

    /// Location the resolution happened on
    pub context: RouteContext,
}

impl ResolvedAffordance {
    pub fn is_enabled(&self) -> bool {
        self.element.enabled
    }
}

/// Outcome of activating an affordance.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ActivationResult {
    Ok,
    Disabled,
    NotFound,
}

impl ActivationResult {
    pub fn is_ok(self) -> bool {
        matches!(self, ActivationResult::Ok)
    }

    pub fn name(self) -> &'static str {
        match self {
            ActivationResult::Ok => "ok",
            ActivationResult::Disabled => "disabled",
            ActivationResult::NotFound => "not-found",
        }
    }
}

/// Before/after record of one activation.
#[derive(Clone, Debug)]
pub struct ActivationReport {
    pub affordance: Affordance,
    pub result: ActivationResult,
    pub before: Option<ElementSnapshot>,
    pub after: Option<ElementSnapshot>,
    pub latency_ms: u128,
}

impl ActivationReport {
    pub fn not_found(affordance: Affordance) -> Self {
        Self {
            affordance,
            result: ActivationResult::NotFound,
            before: None,
            after: None,
            latency_ms: 0,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
