//! Wire format types for the PaySimple v4 API.
//!
//! Every response is wrapped in an [`ApiResponse`] envelope whose `Meta`
//! block carries the HTTP status and, on failure, the structured error list.
//!
//! # Key Types
//!
//! - [`Customer`] - A customer record
//! - [`CreditCard`] / [`AchAccount`] - Stored payment accounts, unified by [`PaymentAccount`]
//! - [`NewPayment`] / [`Payment`] - Payment submission and result
//! - [`ErrorResult`] / [`ErrorMessage`] - Field-level validation errors
//!
//! # Wire Format
//!
//! All types serialize to JSON using `PascalCase` field names. Amounts are
//! JSON numbers.

mod account;
mod customer;
mod envelope;
mod payment;

pub use account::*;
pub use customer::*;
pub use envelope::*;
pub use payment::*;
