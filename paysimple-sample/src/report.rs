//! Turning gateway outcomes and faults into console text.
//!
//! Everything here is pure: callers decide where the lines go.

use std::error::Error;
use std::fmt::Write as _;

use paysimple::EndpointError;
use paysimple::proto::Payment;

/// How field-level validation errors are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationStyle {
    /// For each error, a `Field:` line when the field is named, then a bare
    /// message line regardless. Named fields therefore print twice.
    #[default]
    Verbatim,
    /// Exactly one line per error.
    Deduplicated,
}

/// Describes an endpoint error as console lines.
///
/// - 404 prints `not_found`.
/// - 400 prints the field-level messages per `style`.
/// - Anything else prints `"{status}: {message}"`, where `status` is the
///   numeric code followed by its reason phrase, as in
///   `500 Internal Server Error: boom`.
#[must_use]
pub fn describe_endpoint_error(
    error: &EndpointError,
    not_found: &str,
    style: ValidationStyle,
) -> Vec<String> {
    if error.is_not_found() {
        return vec![not_found.to_owned()];
    }

    if !error.is_bad_request() {
        return vec![format!("{}: {}", error.status(), error.message())];
    }

    let mut lines = Vec::new();
    for entry in error.error_messages() {
        let field_line = entry
            .field_name()
            .map(|field| format!("Bad Request. Field:{field} Message: {}", entry.message));
        let bare_line = format!("Bad Request: {}", entry.message);

        match (style, field_line) {
            (ValidationStyle::Verbatim, Some(field_line)) => {
                lines.push(field_line);
                lines.push(bare_line);
            }
            (ValidationStyle::Deduplicated, Some(field_line)) => lines.push(field_line),
            (_, None) => lines.push(bare_line),
        }
    }
    lines
}

/// Describes a submitted payment: its status and, for failures, why.
#[must_use]
pub fn describe_payment(payment: &Payment) -> Vec<String> {
    let status = payment
        .status
        .map_or_else(|| "Unknown".to_owned(), |s| s.to_string());
    let mut lines = vec![format!("Payment {} is in status {status}", payment.id)];

    if payment.is_failed() {
        let failure = payment.failure_data.clone().unwrap_or_default();
        lines.push(format!(
            "Failure code: '{}'; Description: '{}'; Corrective Action: '{}'",
            failure.code.unwrap_or_default(),
            failure.description.unwrap_or_default(),
            failure.merchant_action_text.unwrap_or_default(),
        ));
    }
    lines
}

/// Renders an error with its full `source()` chain, one cause per line.
#[must_use]
pub fn render_fault(error: &(dyn Error + 'static)) -> String {
    let mut rendered = format!("Error: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(rendered, "\n  caused by: {cause}");
        source = cause.source();
    }
    rendered
}
