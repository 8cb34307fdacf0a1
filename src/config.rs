//! Client options and environment lookup.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::{Error, ErrorContext, Result};

/// Production API host used when no host is configured.
pub const DEFAULT_HOST: &str = "https://api.intervene.run";

/// Environment variable holding the private API key.
pub const ENV_PRIVATE_KEY: &str = "INTERVENE_PRIVATE_KEY";
/// Environment variable overriding the API host.
pub const ENV_HOST: &str = "INTERVENE_HOST";
/// Environment variable setting a request timeout in seconds.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "INTERVENE_HTTP_TIMEOUT_SECS";
/// Environment variable routing all requests through a proxy.
pub const ENV_PROXY_URL: &str = "INTERVENE_PROXY_URL";

#[cfg(feature = "keyring")]
const KEYRING_SERVICE: &str = "intervene";
#[cfg(feature = "keyring")]
const KEYRING_USER: &str = "private_key";

/// Options a client is constructed from.
///
/// Immutable once the client is built.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub private_key: String,
    /// Defaults to [`DEFAULT_HOST`].
    pub host: Option<String>,
}

impl ClientOptions {
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
            host: None,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Returns the effective host, using the default if none is set.
    pub fn effective_host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("private_key", &"<redacted>")
            .field("host", &self.host)
            .finish()
    }
}

/// Returns the default user agent string.
pub(crate) fn default_user_agent() -> String {
    format!("intervene-rust/{}", env!("CARGO_PKG_VERSION"))
}

/// Resolve the private key from the OS keyring (feature `keyring`), then
/// from `INTERVENE_PRIVATE_KEY`.
pub fn private_key_from_env() -> Option<String> {
    #[cfg(feature = "keyring")]
    {
        if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER) {
            if let Ok(key) = entry.get_password() {
                return Some(key);
            }
        }
    }

    non_empty_var(ENV_PRIVATE_KEY)
}

pub(crate) fn host_from_env() -> Option<String> {
    non_empty_var(ENV_HOST)
}

pub(crate) fn proxy_from_env() -> Option<String> {
    non_empty_var(ENV_PROXY_URL)
}

/// Reads `INTERVENE_HTTP_TIMEOUT_SECS`. Unset means no client-side timeout;
/// an unparsable or zero value is a configuration error.
pub(crate) fn timeout_from_env() -> Result<Option<Duration>> {
    let Some(raw) = non_empty_var(ENV_HTTP_TIMEOUT_SECS) else {
        return Ok(None);
    };
    parse_timeout_secs(&raw).map(Some)
}

fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::configuration_with_context(
            "timeout must be a positive number of seconds",
            ErrorContext::new()
                .with_field_path(ENV_HTTP_TIMEOUT_SECS)
                .with_details(raw.to_string())
                .with_source("env"),
        )),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
