use serde::Serialize;
use serde_json::{json, Map, Value};

use voicecart_core_types::closed_set;

closed_set! {
    /// Every action the model may call.
    ActionName {
        Navigate => "navigate",
        AddToCart => "addToCart",
        SelectFit => "selectFit",
        SelectSize => "selectSize",
        SelectInseam => "selectInseam",
        SetFullName => "setFullName",
        SetShippingField => "setShippingField",
        SelectShippingMethod => "selectShippingMethod",
        ClickContinue => "clickContinue",
        SetPhoneNumber => "setPhoneNumber",
        ClickSendCode => "clickSendCode",
        SetVerificationCode => "setVerificationCode",
        ClickVerify => "clickVerify",
        SendPaymentLink => "sendPaymentLink",
        CompletePayment => "completePayment",
        CheckRewardsStatus => "checkRewardsStatus",
        ShowPersonalizedItems => "showPersonalizedItems",
        RespondToRewardsPrompt => "respondToRewardsPrompt",
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ParamType {
    String,
    Boolean,
}

impl ParamType {
    /// Type tag in the model's schema dialect.
    pub fn wire(self) -> &'static str {
        match self {
            ParamType::String => "STRING",
            ParamType::Boolean => "BOOLEAN",
        }
    }

    pub fn accepts(self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Boolean => value.is_boolean(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub ty: ParamType,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<&'static str>>,
    pub required: bool,
}

impl ParamSpec {
    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            ty: ParamType::String,
            description,
            enum_values: None,
            required: true,
        }
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            ty: ParamType::Boolean,
            description,
            enum_values: None,
            required: true,
        }
    }

    pub fn one_of(mut self, values: Vec<&'static str>) -> Self {
        self.enum_values = Some(values);
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn allows(&self, value: &str) -> bool {
        self.enum_values
            .as_ref()
            .map(|values| values.iter().any(|allowed| *allowed == value))
            .unwrap_or(true)
    }
}

/// One callable action as declared to the model.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActionSchema {
    pub name: ActionName,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl ActionSchema {
    pub fn new(name: ActionName, description: &'static str, params: Vec<ParamSpec>) -> Self {
        Self {
            name,
            description,
            params,
        }
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn required_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| p.required)
    }

    /// Function declaration in the model's schema dialect.
    pub fn to_wire(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.params {
            let mut prop = Map::new();
            prop.insert("type".into(), json!(param.ty.wire()));
            prop.insert("description".into(), json!(param.description));
            if let Some(values) = &param.enum_values {
                prop.insert("enum".into(), json!(values));
            }
            properties.insert(param.name.to_string(), Value::Object(prop));
        }
        let required: Vec<&str> = self.required_params().map(|p| p.name).collect();
        json!({
            "name": self.name.as_str(),
            "description": self.description,
            "parameters": {
                "type": "OBJECT",
                "properties": properties,
                "required": required,
            }
        })
    }
}
