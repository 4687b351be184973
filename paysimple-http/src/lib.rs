//! HTTP transport for the PaySimple payments API.
//!
//! Provides [`HttpGatewayClient`], a `reqwest`-based implementation of
//! [`paysimple::Gateway`], and the `PSSERVER` request signing it relies on.
//!
//! # Modules
//!
//! - [`auth`] — `PSSERVER` HMAC authorization header
//! - [`client`] — HTTP gateway client
//! - [`constants`] — Endpoint paths and defaults
//! - [`error`] — HTTP transport error types
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing spans around gateway requests

pub mod auth;
pub mod client;
pub mod constants;
pub mod error;

pub use client::HttpGatewayClient;
pub use error::HttpClientError;
