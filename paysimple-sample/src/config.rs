//! Sample configuration.
//!
//! Loads configuration from a TOML file with support for environment variable
//! expansion in string values. Variables use `$VAR` or `${VAR}` syntax.
//!
//! # Example Configuration
//!
//! ```toml
//! username = "$PAYSIMPLE_USERNAME"
//! api_key = "${PAYSIMPLE_API_KEY}"
//! api_url = "https://sandbox-api.paysimple.com"
//! default_account = "credit_card"
//! timeout_secs = 30
//! dedupe_validation_messages = false
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` — Path to configuration file (default: `paysimple.toml`)
//! - `PAYSIMPLE_USERNAME`, `PAYSIMPLE_API_KEY`, `PAYSIMPLE_API_URL` — Override
//!   the file values
//! - Any variable referenced by `$VAR` in the config file

use std::path::{Path, PathBuf};
use std::time::Duration;

use paysimple::PaySimpleSettings;
use paysimple::proto::AccountKind;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::report::ValidationStyle;
use crate::workflow::WorkflowOptions;

/// Env var overriding [`SampleConfig::username`].
pub const USERNAME_ENV: &str = "PAYSIMPLE_USERNAME";
/// Env var overriding [`SampleConfig::api_key`].
pub const API_KEY_ENV: &str = "PAYSIMPLE_API_KEY";
/// Env var overriding [`SampleConfig::api_url`].
pub const API_URL_ENV: &str = "PAYSIMPLE_API_URL";

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required setting is absent, blank or an unresolved `$VAR`.
    #[error("{0} is missing from configuration")]
    Missing(&'static str),

    /// `api_url` is not an absolute URL.
    #[error("ApiUrl '{value}' is not a valid URL: {source}")]
    InvalidUrl {
        /// The rejected value.
        value: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse configuration file {}: {source}", path.display())]
    Parse {
        /// Path of the file.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level sample configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleConfig {
    /// PaySimple API username.
    #[serde(default)]
    pub username: Option<String>,

    /// PaySimple API key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base service URL (e.g. `https://sandbox-api.paysimple.com`).
    #[serde(default)]
    pub api_url: Option<String>,

    /// Which default account to charge (default: credit card).
    #[serde(default)]
    pub default_account: AccountKind,

    /// Request timeout in seconds (default: `30`).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Print one line per validation error instead of the field line
    /// followed by a bare message line.
    #[serde(default)]
    pub dedupe_validation_messages: bool,
}

const fn default_timeout_secs() -> u64 {
    30
}

impl SampleConfig {
    /// Loads configuration from a specific file path, expanding `$VAR`
    /// references and applying `PAYSIMPLE_*` overrides from the process
    /// environment.
    ///
    /// A missing file is treated as empty, leaving everything to the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = if path.exists() {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_owned(),
                source,
            })?
        } else {
            tracing::debug!(path = %path.display(), "No configuration file, using environment only");
            String::new()
        };

        Self::parse(&content, |name| std::env::var(name).ok()).map_err(|source| {
            ConfigError::Parse {
                path: path.to_owned(),
                source,
            }
        })
    }

    /// Parses TOML content, resolving variables and overrides through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the content does not match the schema.
    pub fn parse(
        content: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, toml::de::Error> {
        let expanded = expand_env_vars(content, &lookup);
        let mut config: Self = toml::from_str(&expanded)?;

        if let Some(username) = lookup(USERNAME_ENV) {
            config.username = Some(username);
        }
        if let Some(api_key) = lookup(API_KEY_ENV) {
            config.api_key = Some(api_key);
        }
        if let Some(api_url) = lookup(API_URL_ENV) {
            config.api_url = Some(api_url);
        }

        Ok(config)
    }

    /// Validates the required settings and builds the session.
    ///
    /// Settings are checked in the order Username, ApiKey, ApiUrl; the first
    /// missing one is reported.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] or [`ConfigError::InvalidUrl`].
    pub fn settings(&self) -> Result<PaySimpleSettings, ConfigError> {
        let username = required(self.username.as_deref(), "Username")?;
        let api_key = required(self.api_key.as_deref(), "ApiKey")?;
        let api_url = required(self.api_url.as_deref(), "ApiUrl")?;

        let base_url = Url::parse(api_url).map_err(|source| ConfigError::InvalidUrl {
            value: api_url.to_owned(),
            source,
        })?;

        Ok(PaySimpleSettings::new(api_key, username, base_url))
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the workflow options derived from this configuration.
    #[must_use]
    pub const fn workflow_options(&self) -> WorkflowOptions {
        WorkflowOptions {
            account_kind: self.default_account,
            validation_style: if self.dedupe_validation_messages {
                ValidationStyle::Deduplicated
            } else {
                ValidationStyle::Verbatim
            },
        }
    }
}

/// Treats absent, blank and unresolved `$VAR` values as missing.
fn required<'a>(value: Option<&'a str>, key: &'static str) -> Result<&'a str, ConfigError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !is_unresolved_var(v))
        .ok_or(ConfigError::Missing(key))
}

/// True when the whole value is a single `$NAME` or `${NAME}` reference.
fn is_unresolved_var(value: &str) -> bool {
    let Some(rest) = value.strip_prefix('$') else {
        return false;
    };
    let name = rest
        .strip_prefix('{')
        .and_then(|r| r.strip_suffix('}'))
        .unwrap_or(rest);
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Expands `$VAR` and `${VAR}` patterns in a string.
///
/// Unresolved variables are left as-is.
fn expand_env_vars(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }

        let mut var_name = String::new();
        let mut closed = false;
        while let Some(&c) = chars.peek() {
            if braced {
                if c == '}' {
                    chars.next();
                    closed = true;
                    break;
                }
            } else if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            var_name.push(c);
            chars.next();
        }

        match lookup(&var_name) {
            Some(value) if !var_name.is_empty() => result.push_str(&value),
            _ => {
                result.push('$');
                if braced {
                    result.push('{');
                }
                result.push_str(&var_name);
                if closed {
                    result.push('}');
                }
            }
        }
    }

    result
}
