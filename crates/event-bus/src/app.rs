//! Custom application events raised by the storefront UI.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use voicecart_core_types::AssistError;

#[derive(Debug, Error)]
pub enum BusError {
    #[error("unknown event type: {0}")]
    UnknownEvent(String),
    #[error("malformed event payload: {0}")]
    Malformed(String),
}

impl From<BusError> for AssistError {
    fn from(err: BusError) -> Self {
        AssistError::new(err.to_string())
    }
}

/// Events the assistant subscribes to.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Loyalty prompt finished its entrance animation.
    RewardsPromptFade,
    /// Loyalty prompt became visible.
    RewardsPromptShow,
    ItemAddedToCart { is_authenticated: bool },
}

impl AppEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            AppEvent::RewardsPromptFade => "rewardsPromptFade",
            AppEvent::RewardsPromptShow => "rewardsPromptShow",
            AppEvent::ItemAddedToCart { .. } => "itemAddedToCart",
        }
    }

    pub fn is_rewards_prompt(&self) -> bool {
        matches!(
            self,
            AppEvent::RewardsPromptFade | AppEvent::RewardsPromptShow
        )
    }
}

/// DOM-style custom event as the UI dispatches it: a type plus a detail
/// payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub detail: Value,
}

impl TryFrom<CustomEvent> for AppEvent {
    type Error = BusError;

    fn try_from(event: CustomEvent) -> Result<Self, Self::Error> {
        match event.event_type.as_str() {
            "rewardsPromptFade" => Ok(AppEvent::RewardsPromptFade),
            "rewardsPromptShow" => Ok(AppEvent::RewardsPromptShow),
            "itemAddedToCart" => {
                // A missing flag reads as unauthenticated, like an absent detail.
                let is_authenticated = match event.detail.get("isAuthenticated") {
                    None | Some(Value::Null) => false,
                    Some(Value::Bool(flag)) => *flag,
                    Some(other) => {
                        return Err(BusError::Malformed(format!(
                            "isAuthenticated must be a boolean, got {other}"
                        )))
                    }
                };
                Ok(AppEvent::ItemAddedToCart { is_authenticated })
            }
            other => Err(BusError::UnknownEvent(other.to_string())),
        }
    }
}

impl From<&AppEvent> for CustomEvent {
    fn from(event: &AppEvent) -> Self {
        let detail = match event {
            AppEvent::ItemAddedToCart { is_authenticated } => {
                serde_json::json!({ "isAuthenticated": is_authenticated })
            }
            _ => Value::Null,
        };
        CustomEvent {
            event_type: event.event_type().to_string(),
            detail,
        }
    }
}
