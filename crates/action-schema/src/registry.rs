//! The declared action catalog.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use voicecart_core_types::{
    Fit, Inseam, PersonalizedCategory, ProductId, Route, ShippingField, ShippingMethod, Size,
};

use crate::model::{ActionName, ActionSchema, ParamSpec};

pub const SYSTEM_INSTRUCTION: &str = "You are a very friendly shopping assistant.
- when user says 'I like the baby boot jeans' you MUST Navigate to the \"/baby-boot-jean\" page and ONLY say 'Here you go!'
- ONLY when you see the rewards prompt animation appear, then you must ask 'Are you a rewards member?'
- when ever user says 'Yes' or 'No', you must 'CLICK' the button that corresponds to the response OR 'NAVIGATE' to the page that corresponds to the response.
- when user say 'please add this item to my cart', you must 'CLICK' the button that corresponds to the response.
- Example: when you ask \"Would you like to check out some personalized items with 10%! off that I've picked just for you?\" and if user says 'YES' or 'Oh! YaSure' or 'Ok' or 'Okie' or anything that means 'Yes', you must 'NAVIGATE' the personalized page.
- Example: when user says 'I like the Gap Logo Tote Bag' or anything that means 'Gap Logo Tote Bag', you must 'NAVIGATE' the Gap Logo Tote page.
- when user says 'Gap Logo Tote Bag' you MUST Click 'add to cart' button'";

/// Schema list plus the system instruction, handed to the session at
/// configuration time.
#[derive(Clone, Debug)]
pub struct Declaration {
    pub schema: Vec<ActionSchema>,
    pub system_instruction: String,
}

impl Declaration {
    pub fn get(&self, name: ActionName) -> Option<&ActionSchema> {
        self.schema.iter().find(|entry| entry.name == name)
    }

    pub fn lookup(&self, raw_name: &str) -> Option<&ActionSchema> {
        ActionName::parse(raw_name).and_then(|name| self.get(name))
    }

    pub fn names(&self) -> Vec<ActionName> {
        self.schema.iter().map(|entry| entry.name).collect()
    }

    /// `tools` value for the session setup message.
    pub fn tools_wire(&self) -> Value {
        let declarations: Vec<Value> = self.schema.iter().map(ActionSchema::to_wire).collect();
        json!([{ "functionDeclarations": declarations }])
    }

    /// `systemInstruction` value for the session setup message.
    pub fn system_instruction_wire(&self) -> Value {
        json!({ "parts": [{ "text": self.system_instruction }] })
    }
}

static DECLARATION: Lazy<Declaration> = Lazy::new(build);

/// The declared catalog; built once and shared read-only.
pub fn declare() -> &'static Declaration {
    &DECLARATION
}

fn click_action() -> ParamSpec {
    ParamSpec::string("action", "Action to perform")
        .one_of(vec!["click"])
        .optional()
}

fn build() -> Declaration {
    let schema = vec![
        ActionSchema::new(
            ActionName::Navigate,
            "Navigate to a specific product page or section",
            vec![ParamSpec::string("route", "The route to navigate to").one_of(Route::wire_values())],
        ),
        ActionSchema::new(
            ActionName::AddToCart,
            "Add current product to shopping cart",
            vec![ParamSpec::string("productId", "ID of the product to add")
                .one_of(ProductId::wire_values())],
        ),
        ActionSchema::new(
            ActionName::SelectFit,
            "Select a fit option for the product",
            vec![ParamSpec::string("fit", "The fit option to select").one_of(Fit::wire_values())],
        ),
        ActionSchema::new(
            ActionName::SelectSize,
            "Select a size option for the product",
            vec![ParamSpec::string("size", "The size option to select").one_of(Size::wire_values())],
        ),
        ActionSchema::new(
            ActionName::SelectInseam,
            "Select an inseam length for the product",
            vec![ParamSpec::string("inseam", "The inseam option to select")
                .one_of(Inseam::wire_values())],
        ),
        ActionSchema::new(
            ActionName::SetFullName,
            "Set the full name in the shipping address form",
            vec![ParamSpec::string("name", "The full name to set in the form")],
        ),
        ActionSchema::new(
            ActionName::SetShippingField,
            "Set a field in the shipping address form",
            vec![
                ParamSpec::string("field", "The field to update in the form")
                    .one_of(ShippingField::wire_values()),
                ParamSpec::string("value", "The value to set in the field"),
            ],
        ),
        ActionSchema::new(
            ActionName::SelectShippingMethod,
            "Select a shipping method option",
            vec![ParamSpec::string("method", "The shipping method to select")
                .one_of(ShippingMethod::wire_values())],
        ),
        ActionSchema::new(
            ActionName::ClickContinue,
            "Click the continue button in the shipping form",
            vec![click_action()],
        ),
        ActionSchema::new(
            ActionName::SetPhoneNumber,
            "Set the phone number in the quick pay form",
            vec![ParamSpec::string("phoneNumber", "The phone number to set in the form")],
        ),
        ActionSchema::new(
            ActionName::ClickSendCode,
            "Click the send code button in the quick pay form",
            vec![click_action()],
        ),
        ActionSchema::new(
            ActionName::SetVerificationCode,
            "Set the verification code in the form",
            vec![ParamSpec::string("code", "The verification code to enter")],
        ),
        ActionSchema::new(
            ActionName::ClickVerify,
            "Click the verify button",
            vec![click_action()],
        ),
        ActionSchema::new(
            ActionName::SendPaymentLink,
            "Click the send payment link button",
            vec![click_action()],
        ),
        ActionSchema::new(
            ActionName::CompletePayment,
            "Click the complete payment with wallet button",
            vec![click_action()],
        ),
        ActionSchema::new(
            ActionName::CheckRewardsStatus,
            "Check if user is a rewards member",
            vec![ParamSpec::string("action", "Action to perform")
                .one_of(vec!["check"])
                .optional()],
        ),
        ActionSchema::new(
            ActionName::ShowPersonalizedItems,
            "Show personalized recommendations",
            vec![ParamSpec::string("category", "Category of items to show")
                .one_of(PersonalizedCategory::wire_values())],
        ),
        ActionSchema::new(
            ActionName::RespondToRewardsPrompt,
            "Respond to rewards membership prompt",
            vec![ParamSpec::boolean(
                "isRewardsMember",
                "Whether the user is a rewards member",
            )],
        ),
    ];

    Declaration {
        schema,
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
    }
}
