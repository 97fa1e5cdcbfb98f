use std::collections::VecDeque;
use std::time::SystemTime;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::effect::Effect;
use crate::event::FlowEvent;
use crate::state::{FlowCtx, FlowState};
use crate::transition::transition;

/// One applied event.
#[derive(Clone, Debug, Serialize)]
pub struct FlowRecord {
    pub event: FlowEvent,
    pub before: FlowState,
    pub after: FlowState,
    pub effects: Vec<Effect>,
    pub recorded_at: SystemTime,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct FlowStats {
    pub events: u64,
    /// Events that changed nothing and produced no effect.
    pub suppressed: u64,
    pub utterances: u64,
}

#[derive(Debug)]
struct BoundedRing<T> {
    capacity: usize,
    data: VecDeque<T>,
}

impl<T: Clone> BoundedRing<T> {
    fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            data: VecDeque::new(),
        }
    }

    fn push(&mut self, item: T) {
        if self.data.len() == self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    fn snapshot(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }
}

/// Live flow state for one mount.
pub struct FlowCenter {
    state: Mutex<FlowState>,
    history: Mutex<BoundedRing<FlowRecord>>,
    stats: Mutex<FlowStats>,
}

impl FlowCenter {
    pub fn new(history: usize) -> Self {
        Self {
            state: Mutex::new(FlowState::default()),
            history: Mutex::new(BoundedRing::new(history)),
            stats: Mutex::new(FlowStats::default()),
        }
    }

    pub fn state(&self) -> FlowState {
        *self.state.lock()
    }

    /// Apply `event` atomically and return the effects to perform.
    pub fn apply(&self, event: FlowEvent, ctx: FlowCtx) -> Vec<Effect> {
        let (before, outcome) = {
            let mut state = self.state.lock();
            let before = *state;
            let outcome = transition(&before, &ctx, event);
            *state = outcome.next;
            (before, outcome)
        };

        let utterances = outcome
            .effects
            .iter()
            .filter(|effect| matches!(effect, Effect::Say(_)))
            .count() as u64;
        {
            let mut stats = self.stats.lock();
            stats.events += 1;
            stats.utterances += utterances;
            if outcome.effects.is_empty() && outcome.next == before {
                stats.suppressed += 1;
            }
        }

        if outcome.next.pending != before.pending {
            info!(
                event = event.name(),
                from = before.pending.as_str(),
                to = outcome.next.pending.as_str(),
                "flow transition"
            );
        } else {
            debug!(event = event.name(), effects = outcome.effects.len(), "flow event");
        }

        self.history.lock().push(FlowRecord {
            event,
            before,
            after: outcome.next,
            effects: outcome.effects.clone(),
            recorded_at: SystemTime::now(),
        });
        outcome.effects
    }

    pub fn history(&self) -> Vec<FlowRecord> {
        self.history.lock().snapshot()
    }

    pub fn stats(&self) -> FlowStats {
        self.stats.lock().clone()
    }
}

impl Default for FlowCenter {
    fn default() -> Self {
        Self::new(128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Script;
    use crate::state::PendingFlow;

    #[test]
    fn history_is_bounded() {
        let center = FlowCenter::new(2);
        for _ in 0..3 {
            center.apply(FlowEvent::SessionDisconnected, FlowCtx::disconnected());
        }
        assert_eq!(center.history().len(), 2);
        assert_eq!(center.stats().events, 3);
    }

    #[test]
    fn stats_count_utterances_and_suppressions() {
        let center = FlowCenter::default();
        let ctx = FlowCtx::connected();
        assert_eq!(
            center.apply(FlowEvent::RewardsPromptSignal, ctx),
            vec![Effect::Say(Script::RewardsQuestion)]
        );
        assert!(center.apply(FlowEvent::RewardsPromptSignal, ctx).is_empty());

        let stats = center.stats();
        assert_eq!(stats.utterances, 1);
        assert_eq!(stats.suppressed, 1);
        assert_eq!(center.state().pending, PendingFlow::AwaitingRewardsAnswer);
    }
}
