//! `PSSERVER` request authentication.
//!
//! PaySimple authenticates server-to-server calls with an HMAC over the
//! request timestamp:
//!
//! ```text
//! Authorization: PSSERVER accessid=APIUser1234; timestamp=2024-05-01T12:00:00.000Z; signature=<base64>
//! ```
//!
//! where the signature is `base64(HMAC-SHA256(key = api key, message = timestamp))`.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use paysimple::PaySimpleSettings;
use reqwest::header::HeaderValue;
use sha2::Sha256;

use crate::constants::AUTH_SCHEME;
use crate::error::HttpClientError;

type HmacSha256 = Hmac<Sha256>;

/// Produces `PSSERVER` authorization headers for one API user.
#[derive(Clone)]
pub struct PsServerAuth {
    username: String,
    api_key: String,
}

impl PsServerAuth {
    /// Creates an authenticator for the given credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
        }
    }

    /// Creates an authenticator from session settings.
    #[must_use]
    pub fn from_settings(settings: &PaySimpleSettings) -> Self {
        Self::new(settings.username(), settings.api_key())
    }

    /// Builds the header value for the current time.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::Auth`] if the credentials cannot be encoded
    /// into a header.
    pub fn header(&self) -> Result<HeaderValue, HttpClientError> {
        self.header_at(Utc::now())
    }

    /// Builds the header value for a fixed timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::Auth`] if the credentials cannot be encoded
    /// into a header.
    pub fn header_at(&self, at: DateTime<Utc>) -> Result<HeaderValue, HttpClientError> {
        let timestamp = at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let signature = sign(&self.api_key, &timestamp)?;
        let value = format!(
            "{AUTH_SCHEME} accessid={}; timestamp={timestamp}; signature={signature}",
            self.username
        );
        HeaderValue::from_str(&value)
            .map_err(|e| HttpClientError::Auth(format!("invalid header value: {e}")))
    }
}

impl fmt::Debug for PsServerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PsServerAuth")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Computes `base64(HMAC-SHA256(api_key, timestamp))`.
///
/// # Errors
///
/// Returns [`HttpClientError::Auth`] if the key is rejected by the MAC.
pub fn sign(api_key: &str, timestamp: &str) -> Result<String, HttpClientError> {
    let mut mac = HmacSha256::new_from_slice(api_key.as_bytes())
        .map_err(|e| HttpClientError::Auth(e.to_string()))?;
    mac.update(timestamp.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn header_has_psserver_shape() {
        let auth = PsServerAuth::new("APIUser1234", "secret");
        let header = auth.header_at(fixed_time()).unwrap();
        let header = header.to_str().unwrap();

        assert!(header.starts_with(
            "PSSERVER accessid=APIUser1234; timestamp=2024-05-01T12:00:00.000Z; signature="
        ));
        let signature = header.rsplit("signature=").next().unwrap();
        assert_eq!(STANDARD.decode(signature).unwrap().len(), 32);
    }

    #[test]
    fn signature_is_deterministic_per_key() {
        let a = sign("secret", "2024-05-01T12:00:00.000Z").unwrap();
        let b = sign("secret", "2024-05-01T12:00:00.000Z").unwrap();
        let c = sign("other", "2024-05-01T12:00:00.000Z").unwrap();
        let d = sign("secret", "2024-05-01T12:00:01.000Z").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn debug_hides_api_key() {
        let auth = PsServerAuth::new("user", "do-not-print");
        assert!(!format!("{auth:?}").contains("do-not-print"));
    }
}
