//! Interactive PaySimple payment sample.
//!
//! Prompts for an existing customer, charges their default account and
//! reports the outcome, looping until the user is done.
//!
//! # Modules
//!
//! - [`config`] — TOML configuration with environment variable expansion
//! - [`console`] — Line-oriented console I/O
//! - [`report`] — Fault and payment rendering
//! - [`workflow`] — The lookup → lookup → pay → report loop

pub mod config;
pub mod console;
pub mod report;
pub mod workflow;

pub use workflow::{Exit, Workflow, WorkflowOptions};
