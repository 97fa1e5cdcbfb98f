//! Typed view of a validated tool call.

use serde_json::{Map, Value};
use tracing::debug;

use voicecart_core_types::{
    Fit, Inseam, PersonalizedCategory, ProductId, Route, ShippingField, ShippingMethod, Size,
    ToolCall,
};

use crate::errors::SchemaError;
use crate::model::{ActionName, ActionSchema, ParamType};
use crate::registry::{declare, Declaration};

/// A tool call that passed schema validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Navigate { route: Route },
    AddToCart { product: ProductId },
    SelectFit { fit: Fit },
    SelectSize { size: Size },
    SelectInseam { inseam: Inseam },
    SetFullName { name: String },
    SetShippingField { field: ShippingField, value: String },
    SelectShippingMethod { method: ShippingMethod },
    ClickContinue,
    SetPhoneNumber { phone_number: String },
    ClickSendCode,
    SetVerificationCode { code: String },
    ClickVerify,
    SendPaymentLink,
    CompletePayment,
    CheckRewardsStatus,
    ShowPersonalizedItems { category: PersonalizedCategory },
    RespondToRewardsPrompt { is_rewards_member: bool },
}

impl Action {
    pub fn name(&self) -> ActionName {
        match self {
            Action::Navigate { .. } => ActionName::Navigate,
            Action::AddToCart { .. } => ActionName::AddToCart,
            Action::SelectFit { .. } => ActionName::SelectFit,
            Action::SelectSize { .. } => ActionName::SelectSize,
            Action::SelectInseam { .. } => ActionName::SelectInseam,
            Action::SetFullName { .. } => ActionName::SetFullName,
            Action::SetShippingField { .. } => ActionName::SetShippingField,
            Action::SelectShippingMethod { .. } => ActionName::SelectShippingMethod,
            Action::ClickContinue => ActionName::ClickContinue,
            Action::SetPhoneNumber { .. } => ActionName::SetPhoneNumber,
            Action::ClickSendCode => ActionName::ClickSendCode,
            Action::SetVerificationCode { .. } => ActionName::SetVerificationCode,
            Action::ClickVerify => ActionName::ClickVerify,
            Action::SendPaymentLink => ActionName::SendPaymentLink,
            Action::CompletePayment => ActionName::CompletePayment,
            Action::CheckRewardsStatus => ActionName::CheckRewardsStatus,
            Action::ShowPersonalizedItems { .. } => ActionName::ShowPersonalizedItems,
            Action::RespondToRewardsPrompt { .. } => ActionName::RespondToRewardsPrompt,
        }
    }

    /// Validate against the shared declaration.
    pub fn from_call(call: &ToolCall) -> Result<Self, SchemaError> {
        Self::from_call_in(declare(), call)
    }

    /// Validate against an explicit declaration.
    pub fn from_call_in(declaration: &Declaration, call: &ToolCall) -> Result<Self, SchemaError> {
        let schema = declaration
            .lookup(&call.name)
            .ok_or_else(|| SchemaError::UnknownAction(call.name.clone()))?;
        let args = Args::validate(schema, &call.args)?;
        debug!(action = %schema.name, "tool call validated");

        let action = match schema.name {
            ActionName::Navigate => Action::Navigate {
                route: args.choice("route", Route::parse)?,
            },
            ActionName::AddToCart => Action::AddToCart {
                product: args.choice("productId", ProductId::parse)?,
            },
            ActionName::SelectFit => Action::SelectFit {
                fit: args.choice("fit", Fit::parse)?,
            },
            ActionName::SelectSize => Action::SelectSize {
                size: args.choice("size", Size::parse)?,
            },
            ActionName::SelectInseam => Action::SelectInseam {
                inseam: args.choice("inseam", Inseam::parse)?,
            },
            ActionName::SetFullName => Action::SetFullName {
                name: args.text("name")?,
            },
            ActionName::SetShippingField => Action::SetShippingField {
                field: args.choice("field", ShippingField::parse)?,
                value: args.text("value")?,
            },
            ActionName::SelectShippingMethod => Action::SelectShippingMethod {
                method: args.choice("method", ShippingMethod::parse)?,
            },
            ActionName::ClickContinue => Action::ClickContinue,
            ActionName::SetPhoneNumber => Action::SetPhoneNumber {
                phone_number: args.text("phoneNumber")?,
            },
            ActionName::ClickSendCode => Action::ClickSendCode,
            ActionName::SetVerificationCode => Action::SetVerificationCode {
                code: args.text("code")?,
            },
            ActionName::ClickVerify => Action::ClickVerify,
            ActionName::SendPaymentLink => Action::SendPaymentLink,
            ActionName::CompletePayment => Action::CompletePayment,
            ActionName::CheckRewardsStatus => Action::CheckRewardsStatus,
            ActionName::ShowPersonalizedItems => Action::ShowPersonalizedItems {
                category: args.choice("category", PersonalizedCategory::parse)?,
            },
            ActionName::RespondToRewardsPrompt => Action::RespondToRewardsPrompt {
                is_rewards_member: args.flag("isRewardsMember")?,
            },
        };
        Ok(action)
    }
}

/// Arguments checked against one schema entry.
struct Args<'a> {
    schema: &'a ActionSchema,
    values: Map<String, Value>,
}

impl<'a> Args<'a> {
    fn validate(schema: &'a ActionSchema, raw: &Value) -> Result<Self, SchemaError> {
        let action = schema.name.as_str();
        let values = match raw {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            _ => return Err(SchemaError::NotAnObject { action }),
        };

        for param in &schema.params {
            match values.get(param.name) {
                None | Some(Value::Null) => {
                    if param.required {
                        return Err(SchemaError::MissingArgument {
                            action,
                            param: param.name,
                        });
                    }
                }
                Some(value) => {
                    if !param.ty.accepts(value) {
                        return Err(SchemaError::InvalidType {
                            action,
                            param: param.name,
                        });
                    }
                    if let (ParamType::String, Some(text)) = (param.ty, value.as_str()) {
                        if !param.allows(text) {
                            return Err(SchemaError::NotInEnum {
                                action,
                                param: param.name,
                                value: text.to_string(),
                            });
                        }
                        // Free text the handler dereferences must carry something.
                        if param.required && param.enum_values.is_none() && text.is_empty() {
                            return Err(SchemaError::MissingArgument {
                                action,
                                param: param.name,
                            });
                        }
                    }
                }
            }
        }

        Ok(Self { schema, values })
    }

    fn param_name(&self, name: &str) -> &'static str {
        self.schema
            .param(name)
            .map(|p| p.name)
            .unwrap_or("<undeclared>")
    }

    fn text(&self, name: &str) -> Result<String, SchemaError> {
        self.values
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(SchemaError::MissingArgument {
                action: self.schema.name.as_str(),
                param: self.param_name(name),
            })
    }

    fn choice<T>(&self, name: &str, parse: fn(&str) -> Option<T>) -> Result<T, SchemaError> {
        let raw = self.text(name)?;
        parse(&raw).ok_or(SchemaError::NotInEnum {
            action: self.schema.name.as_str(),
            param: self.param_name(name),
            value: raw,
        })
    }

    fn flag(&self, name: &str) -> Result<bool, SchemaError> {
        self.values
            .get(name)
            .and_then(Value::as_bool)
            .ok_or(SchemaError::MissingArgument {
                action: self.schema.name.as_str(),
                param: self.param_name(name),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(name: &str, args: Value) -> Result<Action, SchemaError> {
        Action::from_call(&ToolCall::new(name, args))
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = parse("orderPizza", json!({})).unwrap_err();
        assert!(err.is_unknown_action());
    }

    #[test]
    fn enum_values_are_exact() {
        assert_eq!(
            parse("selectSize", json!({ "size": "M" })).unwrap(),
            Action::SelectSize { size: Size::M }
        );
        assert!(matches!(
            parse("selectSize", json!({ "size": "28" })),
            Err(SchemaError::NotInEnum { param: "size", .. })
        ));
        assert!(matches!(
            parse("selectFit", json!({ "fit": "regular" })),
            Err(SchemaError::NotInEnum { .. })
        ));
    }

    #[test]
    fn missing_and_mistyped_arguments_are_rejected() {
        assert!(matches!(
            parse("navigate", json!({})),
            Err(SchemaError::MissingArgument { param: "route", .. })
        ));
        assert!(matches!(
            parse("respondToRewardsPrompt", json!({ "isRewardsMember": "yes" })),
            Err(SchemaError::InvalidType { .. })
        ));
        assert!(matches!(
            parse("setShippingField", json!({ "field": "city" })),
            Err(SchemaError::MissingArgument { param: "value", .. })
        ));
        assert!(matches!(
            parse("setFullName", json!({ "name": "" })),
            Err(SchemaError::MissingArgument { param: "name", .. })
        ));
        assert!(matches!(
            parse("navigate", json!("/cart")),
            Err(SchemaError::NotAnObject { .. })
        ));
    }

    #[test]
    fn click_actions_accept_absent_arguments() {
        assert_eq!(parse("clickContinue", Value::Null).unwrap(), Action::ClickContinue);
        assert_eq!(
            parse("clickVerify", json!({ "action": "click" })).unwrap(),
            Action::ClickVerify
        );
        assert!(parse("clickVerify", json!({ "action": "tap" })).is_err());
    }

    #[test]
    fn extra_arguments_are_ignored() {
        assert_eq!(
            parse("addToCart", json!({ "productId": "gap-logo-tote", "quantity": 2 })).unwrap(),
            Action::AddToCart {
                product: ProductId::GapLogoTote
            }
        );
    }

    #[test]
    fn action_name_round_trips() {
        let action = parse(
            "setShippingField",
            json!({ "field": "zipCode", "value": "94107" }),
        )
        .unwrap();
        assert_eq!(action.name(), ActionName::SetShippingField);
        assert_eq!(
            action,
            Action::SetShippingField {
                field: ShippingField::ZipCode,
                value: "94107".into()
            }
        );
    }
}
