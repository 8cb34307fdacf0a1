use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Proxy, Response};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{Error, ErrorContext, Result};

/// Tracing target for transport events.
pub const TRACING_TARGET: &str = "intervene::transport";

/// Settings the transport is built from.
#[derive(Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub private_key: String,
    /// `None` leaves reqwest's default (no overall timeout).
    pub timeout: Option<Duration>,
    pub user_agent: String,
    pub proxy: Option<String>,
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("base_url", &self.base_url)
            .field("private_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("proxy", &self.proxy)
            .finish()
    }
}

/// HTTP transport bound to one base URL and one set of default headers.
///
/// The `Authorization` header is installed on this instance's
/// `reqwest::Client` at construction and never changes afterwards.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.private_key))
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("Private key is not a valid header value: {}", e),
                    ErrorContext::new()
                        .with_field_path("options.private_key")
                        .with_source("transport"),
                )
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str());

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = &config.proxy {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new()
                        .with_field_path("proxy")
                        .with_details(proxy_url.clone())
                        .with_source("transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to create HTTP client: {}", e),
                ErrorContext::new().with_source("transport"),
            )
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a relative API path (e.g. `v1/parser/identify`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and decode a JSON response body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T> {
        let text = self.send_text(method, path, body).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Send a request and return the response body as text.
    pub async fn send_text(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<String> {
        let response = self.send(method, path, body).await?;
        Ok(response.text().await?)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Response> {
        let request_id = Uuid::new_v4();
        let url = self.url(path);
        let started_at = Instant::now();

        debug!(
            target: TRACING_TARGET,
            %request_id,
            %method,
            path,
            has_body = body.is_some(),
            "Sending request"
        );

        let mut request = self.client.request(method.clone(), &url);
        if let Some(bytes) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(bytes);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    target: TRACING_TARGET,
                    %request_id,
                    %method,
                    path,
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    error = %err,
                    "Request failed"
                );
                return Err(Error::Http(err));
            }
        };

        let status = response.status();
        let elapsed_ms = started_at.elapsed().as_millis() as u64;

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    warn!(
                        target: TRACING_TARGET,
                        %request_id,
                        status = status.as_u16(),
                        error = %err,
                        "Failed to read error response body"
                    );
                    String::new()
                }
            };
            warn!(
                target: TRACING_TARGET,
                %request_id,
                %method,
                path,
                status = status.as_u16(),
                elapsed_ms,
                "Request returned error status"
            );
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!(
            target: TRACING_TARGET,
            %request_id,
            %method,
            path,
            status = status.as_u16(),
            elapsed_ms,
            "Request completed"
        );

        Ok(response)
    }
}
