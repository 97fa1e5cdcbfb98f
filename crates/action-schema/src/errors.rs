use thiserror::Error;

use voicecart_core_types::AssistError;

/// Reasons a tool call does not match the declared schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("{action}: arguments must be an object")]
    NotAnObject { action: &'static str },
    #[error("{action}: missing required argument '{param}'")]
    MissingArgument {
        action: &'static str,
        param: &'static str,
    },
    #[error("{action}: argument '{param}' has the wrong type")]
    InvalidType {
        action: &'static str,
        param: &'static str,
    },
    #[error("{action}: '{value}' is not an allowed value for '{param}'")]
    NotInEnum {
        action: &'static str,
        param: &'static str,
        value: String,
    },
}

impl SchemaError {
    /// Unknown names are expected noise from the model; everything else hints
    /// at schema drift.
    pub fn is_unknown_action(&self) -> bool {
        matches!(self, SchemaError::UnknownAction(_))
    }
}

impl From<SchemaError> for AssistError {
    fn from(err: SchemaError) -> Self {
        AssistError::new(err.to_string())
    }
}
