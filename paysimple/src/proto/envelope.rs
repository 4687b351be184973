use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The envelope every PaySimple response is wrapped in.
///
/// ```json
/// {
///   "Meta": { "Errors": null, "HttpStatus": "OK", "HttpStatusCode": 200 },
///   "Response": { "Id": 1234, "FirstName": "Jane" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiResponse<T> {
    /// Status and error metadata.
    #[serde(default)]
    pub meta: Meta,

    /// The payload. Absent or `null` on failure.
    pub response: Option<T>,
}

/// Response metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Meta {
    /// Structured errors, present on failed requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorResult>,

    /// Status name (e.g. `"BadRequest"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<String>,

    /// Numeric HTTP status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status_code: Option<u16>,

    /// Paging block for list endpoints; carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging_details: Option<Value>,
}

/// The `Meta.Errors` block of a failed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorResult {
    /// Machine-readable error category (e.g. `"InvalidInput"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    /// One entry per rejected field, or a single general message.
    #[serde(default)]
    pub error_messages: Vec<ErrorMessage>,

    /// Gateway-side trace identifier for support requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_code: Option<String>,
}

/// A single field-level error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorMessage {
    /// Name of the offending field. Blank or absent for general errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

impl ErrorMessage {
    /// Creates a message bound to a field.
    #[must_use]
    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Returns the field name when it is present and not blank.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.field.as_deref().filter(|f| !f.trim().is_empty())
    }
}
