use serde::{Deserialize, Serialize};

/// Scripted utterances owned by the cross-flow machine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Script {
    RewardsQuestion,
    SignInWait,
    NoProblem,
    PersonalizedPitch,
    ContinueShopping,
}

impl Script {
    pub fn text(self) -> &'static str {
        match self {
            Script::RewardsQuestion => "Are you a rewards member?",
            Script::SignInWait => {
                "Great! I'll wait while you sign in to access your rewards benefits."
            }
            Script::NoProblem => {
                "No problem! Let's continue shopping. You can always join our rewards program later."
            }
            Script::PersonalizedPitch => {
                "Would you like to check out some personalized items with 10% off that I've picked just for you?"
            }
            Script::ContinueShopping => {
                "Great! I've added that to your cart. Would you like to continue shopping?"
            }
        }
    }
}

/// Buttons on the rewards prompt.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PromptButton {
    Yes,
    No,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    Say(Script),
    Press(PromptButton),
    StartLoginWatch,
    StopLoginWatch,
}
