//! Error types for the HTTP transport.

use paysimple::{EndpointError, GatewayError};

/// Errors that can occur while talking to PaySimple over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    /// URL parse error.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The authorization header could not be produced.
    #[error("failed to sign request: {0}")]
    Auth(String),
    /// Building the underlying `reqwest` client failed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP transport error.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// Failed to read response body.
    #[error("Failed to read response body as text: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// JSON deserialization error.
    #[error("Failed to deserialize JSON: {context}: {source}")]
    JsonDeserialization {
        /// Human-readable context.
        context: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// A success response whose envelope had no `Response` payload.
    #[error("Empty response payload: {context}")]
    EmptyResponse {
        /// Human-readable context.
        context: String,
    },
    /// Non-success HTTP status.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}

impl From<HttpClientError> for GatewayError {
    fn from(err: HttpClientError) -> Self {
        match err {
            HttpClientError::Endpoint(e) => Self::Endpoint(e),
            other => Self::transport(other),
        }
    }
}
