//! Maps raw remote failures to an [`ErrorKind`] and a user-facing message.

use std::collections::HashMap;

use shared::error::ApiError;
use tracing::warn;

use crate::{
    error::{ErrorKind, RemoteFailure, TransportError},
    transport::HttpReply,
};

pub const NETWORK_ERROR_MESSAGE: &str = "Connection error, please try later";
pub const SERVER_ERROR_MESSAGE: &str = "Unexpected error, please try again";
pub const INVALID_REQUEST_FALLBACK_MESSAGE: &str =
    "Invalid request, please review the submitted data";

/// Status codes the client recognizes. Loaded from settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCodes {
    pub ok: u16,
    pub created: u16,
    pub invalid_request: u16,
    pub server_error: u16,
}

impl Default for StatusCodes {
    fn default() -> Self {
        Self {
            ok: 200,
            created: 201,
            invalid_request: 400,
            server_error: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusRule {
    /// Always report `kind` with `message`.
    Fixed { kind: ErrorKind, message: String },
    /// Report `kind` with the `message` field of the JSON error body.
    BodyMessage { kind: ErrorKind, fallback: String },
}

impl StatusRule {
    pub fn fixed(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Fixed {
            kind,
            message: message.into(),
        }
    }

    pub fn body_message(kind: ErrorKind, fallback: impl Into<String>) -> Self {
        Self::BodyMessage {
            kind,
            fallback: fallback.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Failure<'a> {
    Transport(&'a TransportError),
    Reply(&'a HttpReply),
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier {
    rules: HashMap<u16, StatusRule>,
    fallback: StatusRule,
}

impl ErrorClassifier {
    pub fn new(codes: &StatusCodes) -> Self {
        Self {
            rules: HashMap::new(),
            fallback: StatusRule::fixed(ErrorKind::ServerError, SERVER_ERROR_MESSAGE),
        }
        .with_rule(
            codes.invalid_request,
            StatusRule::body_message(ErrorKind::InvalidRequest, INVALID_REQUEST_FALLBACK_MESSAGE),
        )
        .with_rule(
            codes.server_error,
            StatusRule::fixed(ErrorKind::ServerError, SERVER_ERROR_MESSAGE),
        )
    }

    /// Registers (or replaces) the rule for `status`.
    pub fn with_rule(mut self, status: u16, rule: StatusRule) -> Self {
        self.rules.insert(status, rule);
        self
    }

    pub fn rule_for(&self, status: u16) -> &StatusRule {
        self.rules.get(&status).unwrap_or(&self.fallback)
    }

    pub fn classify(&self, failure: Failure<'_>) -> RemoteFailure {
        match failure {
            Failure::Transport(_) => RemoteFailure::new(ErrorKind::NetworkError, NETWORK_ERROR_MESSAGE),
            Failure::Reply(reply) => self.classify_reply(reply),
        }
    }

    fn classify_reply(&self, reply: &HttpReply) -> RemoteFailure {
        match self.rule_for(reply.status) {
            StatusRule::Fixed { kind, message } => RemoteFailure::new(*kind, message.clone()),
            StatusRule::BodyMessage { kind, fallback } => {
                match serde_json::from_slice::<ApiError>(&reply.body) {
                    Ok(body) => RemoteFailure::new(*kind, body.message),
                    Err(error) => {
                        warn!(status = reply.status, %error, "error body has no readable message");
                        RemoteFailure::new(*kind, fallback.clone())
                    }
                }
            }
        }
    }

    /// Failure reported when a success reply cannot be decoded.
    pub fn undecodable(&self) -> RemoteFailure {
        RemoteFailure::new(ErrorKind::ServerError, SERVER_ERROR_MESSAGE)
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new(&StatusCodes::default())
    }
}

#[cfg(test)]
#[path = "tests/classifier_tests.rs"]
mod tests;
