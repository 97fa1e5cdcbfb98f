//! Logical control vocabulary and its DOM contract.
//!
//! The storefront guarantees these identifying attributes whenever the owning
//! page is mounted. Callers only ever name an [`Affordance`]; selector syntax
//! stays in this module.

use std::fmt;

use serde::{Deserialize, Serialize};

use voicecart_core_types::{Fit, Inseam, ShippingField, ShippingMethod, Size};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Affordance {
    AddToBag,
    FitOption(Fit),
    SizeOption(Size),
    InseamOption(Inseam),
    ShippingInput(ShippingField),
    ShippingOption(ShippingMethod),
    ContinueButton,
    PhoneInput,
    SendCodeButton,
    CodeInput,
    VerifyButton,
    SendPaymentLinkButton,
    WalletPayButton,
    RewardsUnlockButton,
    RewardsYesButton,
    RewardsNoButton,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AffordanceKind {
    Button,
    /// One of several same-selector controls told apart by label.
    Choice,
    TextField,
}

/// Required label text for a choice.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LabelMatch {
    pub text: &'static str,
    /// Ignore surrounding whitespace in the rendered label.
    pub trimmed: bool,
}

impl LabelMatch {
    pub fn matches(&self, rendered: &str) -> bool {
        if self.trimmed {
            rendered.trim() == self.text
        } else {
            rendered == self.text
        }
    }
}

impl Affordance {
    pub fn kind(&self) -> AffordanceKind {
        match self {
            Affordance::FitOption(_)
            | Affordance::SizeOption(_)
            | Affordance::InseamOption(_)
            | Affordance::ShippingOption(_) => AffordanceKind::Choice,
            Affordance::ShippingInput(_) | Affordance::PhoneInput | Affordance::CodeInput => {
                AffordanceKind::TextField
            }
            _ => AffordanceKind::Button,
        }
    }

    pub fn selector(&self) -> String {
        match self {
            Affordance::AddToBag => ".add-to-bag".into(),
            Affordance::FitOption(_) => ".fit-option".into(),
            // Inseam lengths render in the size-option row.
            Affordance::SizeOption(_) | Affordance::InseamOption(_) => ".size-option".into(),
            Affordance::ShippingInput(field) => {
                format!("input[placeholder=\"{}\"]", field.placeholder())
            }
            Affordance::ShippingOption(_) => ".shipping-option".into(),
            Affordance::ContinueButton => ".continue-btn".into(),
            Affordance::PhoneInput => "#phone".into(),
            Affordance::SendCodeButton => ".phone-input-row button[type=\"submit\"]".into(),
            Affordance::CodeInput => "#code".into(),
            Affordance::VerifyButton => ".verification-code-row button[type=\"submit\"]".into(),
            Affordance::SendPaymentLinkButton => ".send-link-btn".into(),
            Affordance::WalletPayButton => ".wallet-pay-btn".into(),
            Affordance::RewardsUnlockButton => ".rewards-unlock-btn".into(),
            Affordance::RewardsYesButton => ".rewards-prompt button:first-child".into(),
            Affordance::RewardsNoButton => ".rewards-prompt button:last-child".into(),
        }
    }

    /// Allow-listed label for choices; `None` for singular controls.
    pub fn label(&self) -> Option<LabelMatch> {
        let (text, trimmed) = match self {
            Affordance::FitOption(fit) => (fit.as_str(), false),
            Affordance::SizeOption(size) => (size.as_str(), true),
            Affordance::InseamOption(inseam) => (inseam.as_str(), false),
            Affordance::ShippingOption(method) => (method.as_str(), false),
            _ => return None,
        };
        Some(LabelMatch { text, trimmed })
    }
}

impl fmt::Display for Affordance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Affordance::AddToBag => write!(f, "add-to-bag button"),
            Affordance::FitOption(fit) => write!(f, "fit option {fit}"),
            Affordance::SizeOption(size) => write!(f, "size option {size}"),
            Affordance::InseamOption(inseam) => write!(f, "inseam option {inseam}"),
            Affordance::ShippingInput(field) => write!(f, "shipping field: {field}"),
            Affordance::ShippingOption(method) => write!(f, "shipping method {method}"),
            Affordance::ContinueButton => write!(f, "continue button"),
            Affordance::PhoneInput => write!(f, "phone field"),
            Affordance::SendCodeButton => write!(f, "send-code button"),
            Affordance::CodeInput => write!(f, "verification code field"),
            Affordance::VerifyButton => write!(f, "verify button"),
            Affordance::SendPaymentLinkButton => write!(f, "send payment link button"),
            Affordance::WalletPayButton => write!(f, "wallet pay button"),
            Affordance::RewardsUnlockButton => write!(f, "rewards unlock button"),
            Affordance::RewardsYesButton => write!(f, "rewards prompt yes"),
            Affordance::RewardsNoButton => write!(f, "rewards prompt no"),
        }
    }
}

/// Page-level state markers queried for presence only.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// Some size option carries the selected state.
    SizeSelected,
    /// The header shows a signed-in user.
    LoggedIn,
}

impl Marker {
    pub fn selector(&self) -> &'static str {
        match self {
            Marker::SizeSelected => ".size-option.selected",
            Marker::LoggedIn => ".user-logged-in",
        }
    }
}
