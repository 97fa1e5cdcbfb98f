use serde::{Deserialize, Serialize};

/// At most one flow is pending at a time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PendingFlow {
    #[default]
    None,
    AwaitingRewardsAnswer,
    AwaitingLoginCompletion,
}

impl PendingFlow {
    pub fn as_str(self) -> &'static str {
        match self {
            PendingFlow::None => "none",
            PendingFlow::AwaitingRewardsAnswer => "awaitingRewardsAnswer",
            PendingFlow::AwaitingLoginCompletion => "awaitingLoginCompletion",
        }
    }
}

/// Flow state for one mount. The two guards never reset within a mount.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FlowState {
    pub pending: PendingFlow,
    /// The rewards question has been asked.
    pub rewards_asked: bool,
    /// Login completion has been acknowledged.
    pub post_login_shown: bool,
}

impl FlowState {
    pub fn awaiting_login(&self) -> bool {
        self.pending == PendingFlow::AwaitingLoginCompletion
    }
}

/// Facts about the outside world a transition may depend on.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FlowCtx {
    pub connected: bool,
}

impl FlowCtx {
    pub fn connected() -> Self {
        Self { connected: true }
    }

    pub fn disconnected() -> Self {
        Self { connected: false }
    }
}
