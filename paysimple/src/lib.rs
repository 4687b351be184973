#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the PaySimple payments API.
//!
//! This crate holds everything a caller needs to talk to PaySimple without
//! committing to a transport: the session settings, the wire entities, the
//! fault taxonomy, and the [`Gateway`] trait that transports implement.
//!
//! # Modules
//!
//! - [`settings`] - Immutable session credentials and base URL
//! - [`proto`] - Wire format types (customers, accounts, payments, envelope)
//! - [`error`] - Endpoint faults and the gateway error channel
//! - [`gateway`] - Async trait for the customer/account/payment calls
//!
//! The HTTP implementation lives in the `paysimple-http` crate.

pub mod error;
pub mod gateway;
pub mod proto;
pub mod settings;

pub use error::{EndpointError, GatewayError};
pub use gateway::Gateway;
pub use settings::PaySimpleSettings;
