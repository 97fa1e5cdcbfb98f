use thiserror::Error;

use voicecart_action_schema::SchemaError;
use voicecart_core_types::AssistError;
use voicecart_live_session::SessionError;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("missing collaborator: {0}")]
    MissingPort(&'static str),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<DispatchError> for AssistError {
    fn from(value: DispatchError) -> Self {
        match value {
            DispatchError::Session(err) => err.into(),
            other => AssistError::new(other.to_string()),
        }
    }
}
