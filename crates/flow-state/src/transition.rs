use crate::effect::{Effect, PromptButton, Script};
use crate::event::FlowEvent;
use crate::state::{FlowCtx, FlowState, PendingFlow};

/// Result of applying one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: FlowState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(state: &FlowState) -> Self {
        Self {
            next: *state,
            effects: Vec::new(),
        }
    }
}

/// Pure transition function.
pub fn transition(state: &FlowState, ctx: &FlowCtx, event: FlowEvent) -> Transition {
    let mut next = *state;
    let mut effects = Vec::new();

    match event {
        FlowEvent::RewardsPromptSignal => {
            if !ctx.connected || state.awaiting_login() || state.rewards_asked {
                return Transition::stay(state);
            }
            effects.push(Effect::Say(Script::RewardsQuestion));
            next.rewards_asked = true;
            next.pending = PendingFlow::AwaitingRewardsAnswer;
        }

        FlowEvent::RewardsAnswer {
            is_rewards_member: true,
        } => {
            if state.awaiting_login() {
                return Transition::stay(state);
            }
            effects.push(Effect::Say(Script::SignInWait));
            effects.push(Effect::Press(PromptButton::Yes));
            effects.push(Effect::StartLoginWatch);
            next.pending = PendingFlow::AwaitingLoginCompletion;
        }

        FlowEvent::RewardsAnswer {
            is_rewards_member: false,
        } => {
            effects.push(Effect::Say(Script::NoProblem));
            effects.push(Effect::Press(PromptButton::No));
            if state.awaiting_login() {
                effects.push(Effect::StopLoginWatch);
            }
            next.pending = PendingFlow::None;
        }

        FlowEvent::LoginProbe {
            on_product_page,
            logged_in,
        } => {
            if !state.awaiting_login()
                || !on_product_page
                || !logged_in
                || state.post_login_shown
            {
                return Transition::stay(state);
            }
            effects.push(Effect::StopLoginWatch);
            next.pending = PendingFlow::None;
            next.post_login_shown = true;
        }

        FlowEvent::ItemAddedToCart { is_authenticated } => {
            if !ctx.connected || state.awaiting_login() {
                return Transition::stay(state);
            }
            let script = if is_authenticated {
                Script::PersonalizedPitch
            } else {
                Script::ContinueShopping
            };
            effects.push(Effect::Say(script));
        }

        FlowEvent::SessionDisconnected => {
            if state.awaiting_login() {
                effects.push(Effect::StopLoginWatch);
            }
            next.pending = PendingFlow::None;
        }
    }

    Transition { next, effects }
}
