use std::fmt;

use thiserror::Error;

use crate::validation::ValidationResult;

/// Closed set of remote failure kinds a settled operation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ServerError,
    InvalidRequest,
    NetworkError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ServerError => "server_error",
            Self::InvalidRequest => "invalid_request",
            Self::NetworkError => "network_error",
        };
        f.write_str(label)
    }
}

/// A classified remote failure: the kind plus the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct RemoteFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl RemoteFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The remote call never produced a status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid endpoint url: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("response body could not be read: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self::Connection(value.to_string())
    }
}

/// A success reply whose body does not match the expected shape.
#[derive(Debug, Error)]
#[error("unexpected response body: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Reasons a `run()` call was refused without dispatching anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunRejected {
    #[error("an operation is already in flight")]
    Busy,
    #[error("{} required field(s) missing", .0.error_count())]
    Invalid(ValidationResult),
}
