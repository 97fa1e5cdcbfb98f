//! Error types for the locator

use thiserror::Error;

use voicecart_core_types::AssistError;

#[derive(Debug, Error, Clone)]
pub enum LocatorError {
    /// No rendered element matches the affordance
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Text field activated without a value
    #[error("Missing value for {0}")]
    MissingValue(String),

    /// The UI adapter failed
    #[error("UI port error: {0}")]
    Port(#[from] AssistError),
}

impl LocatorError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LocatorError::ElementNotFound(_))
    }
}

impl From<LocatorError> for AssistError {
    fn from(err: LocatorError) -> Self {
        match err {
            LocatorError::Port(inner) => inner,
            other => AssistError::new(other.to_string()),
        }
    }
}
