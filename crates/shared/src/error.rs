use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the store API for rejected requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown product type '{0}', expected one of: electronic, furniture, clothing")]
pub struct ParseProductTypeError(pub String);
