use crate::client::core::InterveneClient;
use crate::config::{self, ClientOptions};
use crate::transport::{HttpTransport, TransportConfig};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Only the private key is required. Everything else falls back to the
/// production host and reqwest's transport defaults.
#[derive(Default)]
pub struct InterveneClientBuilder {
    private_key: Option<String>,
    host: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    proxy: Option<String>,
    /// Where a missing key should have come from, for error context.
    key_origin: Option<&'static str>,
}

impl InterveneClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from [`ClientOptions`].
    pub fn from_options(options: ClientOptions) -> Self {
        Self {
            private_key: Some(options.private_key),
            host: options.host,
            ..Self::default()
        }
    }

    /// Start from the environment:
    /// - `INTERVENE_PRIVATE_KEY` (or the OS keyring with feature `keyring`)
    /// - `INTERVENE_HOST`
    /// - `INTERVENE_HTTP_TIMEOUT_SECS`
    /// - `INTERVENE_PROXY_URL`
    ///
    /// Values set explicitly on the builder afterwards take precedence.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            private_key: config::private_key_from_env(),
            host: config::host_from_env(),
            timeout: config::timeout_from_env()?,
            user_agent: None,
            proxy: config::proxy_from_env(),
            key_origin: Some(config::ENV_PRIVATE_KEY),
        })
    }

    pub fn private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self.key_origin = None;
        self
    }

    /// Override the API host (scheme + authority, optionally a path prefix).
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Overall timeout per request. Unset by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Route all requests through the given proxy.
    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy = Some(proxy_url.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<InterveneClient> {
        let private_key = self
            .private_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "Private key must be specified",
                    ErrorContext::new()
                        .with_field_path(self.key_origin.unwrap_or("options.private_key"))
                        .with_source("client_builder"),
                )
            })?;

        let options = ClientOptions {
            private_key,
            host: self.host,
        };
        let base_url = validate_host(options.effective_host())?;

        let transport = HttpTransport::new(&TransportConfig {
            base_url,
            private_key: options.private_key.clone(),
            timeout: self.timeout.filter(|t| !t.is_zero()),
            user_agent: self
                .user_agent
                .filter(|ua| !ua.is_empty())
                .unwrap_or_else(config::default_user_agent),
            proxy: self.proxy,
        })?;

        Ok(InterveneClient::from_parts(options, Arc::new(transport)))
    }
}

fn validate_host(host: &str) -> Result<String> {
    let context = || {
        ErrorContext::new()
            .with_field_path("options.host")
            .with_details(host.to_string())
            .with_source("client_builder")
    };

    let url = url::Url::parse(host).map_err(|e| {
        Error::configuration_with_context(format!("Invalid host URL: {}", e), context())
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(Error::configuration_with_context(
            "Host must be an http(s) URL",
            context(),
        ));
    }

    Ok(host.trim_end_matches('/').to_string())
}
