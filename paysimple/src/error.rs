//! Error types for PaySimple gateway calls.
//!
//! Two channels:
//!
//! - [`EndpointError`]: the gateway answered with a non-success status. These
//!   are expected outcomes (unknown customer, rejected payment) and callers
//!   inspect them.
//! - [`GatewayError::Transport`]: anything else (network, URL, decoding).
//!   Callers treat these as opaque.

use std::fmt;

use http::StatusCode;

use crate::proto::{ApiResponse, ErrorMessage, ErrorResult};

/// A non-success response from a PaySimple endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointError {
    status: StatusCode,
    message: String,
    errors: Option<ErrorResult>,
}

impl EndpointError {
    /// Creates an endpoint error with no structured detail.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    /// Attaches the structured `Meta.Errors` block.
    #[must_use]
    pub fn with_errors(mut self, errors: ErrorResult) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Builds an endpoint error from a raw response body.
    ///
    /// When the body is a PaySimple envelope with error messages, those are
    /// kept and joined into the message. Otherwise the trimmed body is the
    /// message, falling back to the status reason phrase for empty bodies.
    #[must_use]
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let errors = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
            .ok()
            .and_then(|envelope| envelope.meta.errors);

        let joined = errors
            .as_ref()
            .map(|e| {
                e.error_messages
                    .iter()
                    .map(|m| m.message.as_str())
                    .filter(|m| !m.is_empty())
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .unwrap_or_default();

        let message = if !joined.is_empty() {
            joined
        } else if !body.trim().is_empty() {
            body.trim().to_owned()
        } else {
            status.canonical_reason().unwrap_or("Unknown status").to_owned()
        };

        Self {
            status,
            message,
            errors,
        }
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the summary message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the structured error block, if the gateway sent one.
    #[must_use]
    pub const fn errors(&self) -> Option<&ErrorResult> {
        self.errors.as_ref()
    }

    /// Returns the field-level messages, empty when none were sent.
    #[must_use]
    pub fn error_messages(&self) -> &[ErrorMessage] {
        self.errors
            .as_ref()
            .map(|e| e.error_messages.as_slice())
            .unwrap_or_default()
    }

    /// `true` for HTTP 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }

    /// `true` for HTTP 400.
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        self.status == StatusCode::BAD_REQUEST
    }
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for EndpointError {}

/// Errors returned by [`Gateway`](crate::Gateway) implementations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The endpoint answered with a non-success status.
    #[error("PaySimple endpoint error")]
    Endpoint(#[from] EndpointError),

    /// The request never produced a usable response.
    #[error("PaySimple transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Creates a transport error from any boxed error.
    #[must_use]
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(err.into())
    }

    /// Returns the endpoint error, if this is one.
    #[must_use]
    pub const fn as_endpoint(&self) -> Option<&EndpointError> {
        match self {
            Self::Endpoint(e) => Some(e),
            Self::Transport(_) => None,
        }
    }
}
