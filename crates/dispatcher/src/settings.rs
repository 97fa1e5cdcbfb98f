use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing knobs for one assistant mount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    /// Delay before a control gated on a just-set value is pressed.
    pub settle_ms: u64,
    /// Login-wait poll interval.
    pub login_poll_ms: u64,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            settle_ms: 100,
            login_poll_ms: 1000,
        }
    }
}

impl AssistantSettings {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn login_poll(&self) -> Duration {
        Duration::from_millis(self.login_poll_ms.max(1))
    }
}
