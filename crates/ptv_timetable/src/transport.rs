//! HTTP transport
//!
//! The client hands signed URLs to a [`Transport`] and gets back the raw
//! status, headers and body. [`HttpTransport`] is the reqwest implementation.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, instrument};

use crate::config::PtvConfig;
use crate::error::PtvError;

/// Undecoded HTTP response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, names lowercased
    pub headers: Vec<(String, String)>,
    /// Response body
    pub body: String,
}

impl RawResponse {
    /// Create a response with no headers
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Add a header (builder style)
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_ascii_lowercase(), value.into()));
        self
    }

    /// First value of a header, matched case-insensitively
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check for a 2xx status
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Dispatches a fully built URL
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET for `url` and return the raw response
    async fn dispatch(&self, url: &str) -> Result<RawResponse, PtvError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout_secs: u64,
}

impl HttpTransport {
    /// Create a transport with the configured timeouts
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &PtvConfig) -> Result<Self, PtvError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("ptv_timetable/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PtvError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, url))]
    async fn dispatch(&self, url: &str) -> Result<RawResponse, PtvError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PtvError::Timeout {
                        timeout_secs: self.timeout_secs,
                    }
                } else {
                    PtvError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| PtvError::ParseError(e.to_string()))?;

        debug!(status, bytes = body.len(), "PTV response received");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_case_insensitive() {
        let raw = RawResponse::new(200, "{}").with_header("Date", "Tue, 15 Nov 1994 08:12:31 GMT");
        assert_eq!(raw.header("date"), Some("Tue, 15 Nov 1994 08:12:31 GMT"));
        assert_eq!(raw.header("DATE"), Some("Tue, 15 Nov 1994 08:12:31 GMT"));
        assert!(raw.header("retry-after").is_none());
    }

    #[test]
    fn test_is_success() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(403, "").is_success());
        assert!(!RawResponse::new(500, "").is_success());
    }

    #[test]
    fn test_http_transport_builds() {
        assert!(HttpTransport::new(&PtvConfig::for_testing()).is_ok());
    }
}
