use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DistanceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Too many elements: {elements} requested, limit is {limit}")]
    OverLimit { elements: usize, limit: usize },

    #[error("Internal error: {0}")]
    Internal(String),

    /// Only ever delivered to async callbacks.
    #[error("Distance calculation cancelled")]
    Cancelled,
}

impl DistanceError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        DistanceError::InvalidInput(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DistanceError::Internal(message.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, DistanceError::Cancelled)
    }
}

impl From<TransportError> for DistanceError {
    fn from(error: TransportError) -> Self {
        DistanceError::Internal(error.to_string())
    }
}

impl From<serde_json::Error> for DistanceError {
    fn from(error: serde_json::Error) -> Self {
        DistanceError::Internal(format!("Malformed response body: {error}"))
    }
}
