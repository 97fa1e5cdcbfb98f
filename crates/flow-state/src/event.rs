use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FlowEvent {
    /// The rewards prompt appeared or finished its entrance animation.
    RewardsPromptSignal,
    /// `respondToRewardsPrompt`, applied once the session is connected.
    #[serde(rename_all = "camelCase")]
    RewardsAnswer { is_rewards_member: bool },
    /// One tick of the login-wait poll.
    #[serde(rename_all = "camelCase")]
    LoginProbe { on_product_page: bool, logged_in: bool },
    #[serde(rename_all = "camelCase")]
    ItemAddedToCart { is_authenticated: bool },
    SessionDisconnected,
}

impl FlowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FlowEvent::RewardsPromptSignal => "rewardsPromptSignal",
            FlowEvent::RewardsAnswer { .. } => "rewardsAnswer",
            FlowEvent::LoginProbe { .. } => "loginProbe",
            FlowEvent::ItemAddedToCart { .. } => "itemAddedToCart",
            FlowEvent::SessionDisconnected => "sessionDisconnected",
        }
    }
}
