use serde_json::json;
use voicecart_action_schema::{declare, Action, ActionName, ParamType};
use voicecart_core_types::ToolCall;

/// A minimal valid argument object for each action, built from the schema.
fn sample_args(name: ActionName) -> serde_json::Value {
    let entry = declare().get(name).unwrap();
    let mut args = serde_json::Map::new();
    for param in entry.required_params() {
        let value = match (param.ty, &param.enum_values) {
            (ParamType::Boolean, _) => json!(true),
            (ParamType::String, Some(values)) => json!(values[0]),
            (ParamType::String, None) => json!("sample"),
        };
        args.insert(param.name.to_string(), value);
    }
    serde_json::Value::Object(args)
}

#[test]
fn every_declared_action_parses_from_its_own_schema() {
    for name in ActionName::ALL {
        let call = ToolCall::new(name.as_str(), sample_args(*name));
        let action = Action::from_call(&call)
            .unwrap_or_else(|err| panic!("{name} failed to validate: {err}"));
        assert_eq!(action.name(), *name);
    }
}

#[test]
fn declaration_exports_as_yaml() {
    let yaml = serde_yaml::to_string(&declare().schema).unwrap();
    assert!(yaml.contains("respondToRewardsPrompt") || yaml.contains("RespondToRewardsPrompt"));
    assert!(yaml.contains("isRewardsMember"));
}

#[test]
fn system_instruction_mentions_rewards_question() {
    let wire = declare().system_instruction_wire();
    let text = wire["parts"][0]["text"].as_str().unwrap();
    assert!(text.contains("Are you a rewards member?"));
}
