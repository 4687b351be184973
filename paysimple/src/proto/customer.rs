use serde::{Deserialize, Serialize};

/// PaySimple customer identifier.
pub type CustomerId = i32;

/// A customer record as returned by `GET /v4/customer/{id}`.
///
/// Only the fields this client reads are modelled; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    /// Customer identifier.
    pub id: CustomerId,

    /// Given name.
    #[serde(default)]
    pub first_name: String,

    /// Family name.
    #[serde(default)]
    pub last_name: String,

    /// Company name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Contact email, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Customer {
    /// Returns `"{first} {last}"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
