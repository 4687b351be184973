//! Endpoint paths and defaults for the PaySimple v4 API.

/// Scheme name of the authorization header.
pub const AUTH_SCHEME: &str = "PSSERVER";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `GET v4/customer/{id}`.
pub(crate) fn customer_path(customer_id: i32) -> String {
    format!("v4/customer/{customer_id}")
}

/// `GET v4/customer/{id}/defaultcreditcard`.
pub(crate) fn default_credit_card_path(customer_id: i32) -> String {
    format!("v4/customer/{customer_id}/defaultcreditcard")
}

/// `GET v4/customer/{id}/defaultach`.
pub(crate) fn default_ach_path(customer_id: i32) -> String {
    format!("v4/customer/{customer_id}/defaultach")
}

/// `POST v4/payment`.
pub(crate) const PAYMENT_PATH: &str = "v4/payment";
