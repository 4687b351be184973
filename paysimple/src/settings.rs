//! Session settings shared by every gateway call.

use std::fmt;

use url::Url;

/// Credentials and endpoint for one PaySimple session.
///
/// Built once at startup and handed to the transport. Never mutated.
#[derive(Clone)]
pub struct PaySimpleSettings {
    api_key: String,
    username: String,
    base_url: Url,
}

impl PaySimpleSettings {
    /// Creates settings from an API key, API username and base service URL
    /// (e.g. `https://sandbox-api.paysimple.com`).
    #[must_use]
    pub fn new(api_key: impl Into<String>, username: impl Into<String>, base_url: Url) -> Self {
        Self {
            api_key: api_key.into(),
            username: username.into(),
            base_url,
        }
    }

    /// Returns the shared secret used to sign requests.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the API username (the `accessid` of the authorization header).
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the base service URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl fmt::Debug for PaySimpleSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaySimpleSettings")
            .field("username", &self.username)
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}
