//! PTV Timetable API client
//!
//! Signs requests with a [`UrlSigner`], dispatches them through a
//! [`Transport`] and normalizes the result into a [`PtvResponse`].

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use crate::config::PtvConfig;
use crate::error::PtvError;
use crate::models::{ApiErrorBody, PtvResponse};
use crate::request::PtvRequest;
use crate::signer::{SignedUrl, UrlSigner};
use crate::transport::{HttpTransport, RawResponse, Transport};

/// Format of the normalized `time` field
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Client for the PTV Timetable API
#[derive(Debug, Clone)]
pub struct PtvClient<T = HttpTransport> {
    signer: UrlSigner,
    transport: T,
}

impl PtvClient<HttpTransport> {
    /// Create a client backed by reqwest
    ///
    /// Credentials are checked when a URL is built, not here.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &PtvConfig) -> Result<Self, PtvError> {
        Ok(Self {
            signer: UrlSigner::from_config(config),
            transport: HttpTransport::new(config)?,
        })
    }
}

impl<T: Transport> PtvClient<T> {
    /// Create a client from a signer and any transport
    pub const fn with_transport(signer: UrlSigner, transport: T) -> Self {
        Self { signer, transport }
    }

    /// The signer used for every request
    pub const fn signer(&self) -> &UrlSigner {
        &self.signer
    }

    /// Generate plain `http://` URLs from now on
    pub fn dont_use_https(&mut self) {
        self.signer.dont_use_https();
    }

    /// Build the signed URL for a request without sending it
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::ConfigurationError`] if credentials are unset.
    pub fn url(&self, request: &PtvRequest) -> Result<SignedUrl, PtvError> {
        self.signer.sign(request)
    }

    /// Sign and send a request
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::ConfigurationError`] before any network activity if
    /// the request cannot be signed, otherwise any transport or decoding error.
    #[instrument(skip(self, request), fields(endpoint = %request.endpoint()))]
    pub async fn get(&self, request: &PtvRequest) -> Result<PtvResponse, PtvError> {
        let url = self.url(request)?;
        self.fetch(&url).await
    }

    /// Send an already signed URL
    ///
    /// # Errors
    ///
    /// Returns any transport or decoding error.
    pub async fn fetch(&self, url: &SignedUrl) -> Result<PtvResponse, PtvError> {
        self.call(url.as_str()).await
    }

    /// Send an arbitrary URL and normalize the response
    ///
    /// # Errors
    ///
    /// Returns any transport or decoding error.
    pub async fn call(&self, url: &str) -> Result<PtvResponse, PtvError> {
        let started = Instant::now();
        let raw = self.transport.dispatch(url).await?;
        let execution = started.elapsed();

        check_status(&raw)?;

        let body =
            serde_json::from_str(&raw.body).map_err(|e| PtvError::ParseError(e.to_string()))?;
        let time = server_time(raw.header("date"), Utc::now());

        debug!(
            status = raw.status,
            elapsed_ms = execution.as_millis(),
            %time,
            "PTV request completed"
        );

        Ok(PtvResponse {
            body,
            url: url.to_string(),
            execution,
            time,
        })
    }
}

/// Map non-success statuses to errors
fn check_status(raw: &RawResponse) -> Result<(), PtvError> {
    if raw.is_success() {
        return Ok(());
    }

    let api_message = serde_json::from_str::<ApiErrorBody>(&raw.body)
        .ok()
        .map(|b| b.message);
    let message = api_message
        .clone()
        .unwrap_or_else(|| format!("HTTP {}", raw.status));

    warn!(status = raw.status, %message, "PTV request rejected");

    Err(match raw.status {
        401 | 403 => PtvError::AuthenticationFailed(message),
        429 => PtvError::RateLimitExceeded {
            retry_after_secs: raw.header("retry-after").and_then(|v| v.parse().ok()),
        },
        503 => PtvError::ServiceUnavailable(message),
        status => PtvError::RequestFailed(match api_message {
            Some(detail) => format!("HTTP {status}: {detail}"),
            None => format!("HTTP {status}"),
        }),
    })
}

/// UTC timestamp from the `Date` header, falling back to `now`
fn server_time(date_header: Option<&str>, now: DateTime<Utc>) -> String {
    let time = date_header.and_then(|value| match DateTime::parse_from_rfc2822(value) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(e) => {
            warn!(%value, error = %e, "Unparsable Date header, using local clock");
            None
        },
    });
    time.unwrap_or(now).format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use mockall::predicate::eq;

    use super::*;
    use crate::params::QueryParams;
    use crate::route_type::RouteType;
    use crate::transport::MockTransport;

    fn signer() -> UrlSigner {
        UrlSigner::new()
            .with_developer_id("1")
            .with_developer_key("test")
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_server_time_from_date_header() {
        let time = server_time(Some("Mon, 19 Oct 2026 21:15:07 GMT"), fixed_now());
        assert_eq!(time, "2026-10-19T21:15:07Z");
    }

    #[test]
    fn test_server_time_converts_offset_to_utc() {
        let time = server_time(Some("Tue, 20 Oct 2026 08:15:07 +1100"), fixed_now());
        assert_eq!(time, "2026-10-19T21:15:07Z");
    }

    #[test]
    fn test_server_time_falls_back_to_now() {
        assert_eq!(server_time(None, fixed_now()), "2026-10-19T08:30:00Z");
        assert_eq!(
            server_time(Some("yesterday"), fixed_now()),
            "2026-10-19T08:30:00Z"
        );
    }

    #[test]
    fn test_check_status_mapping() {
        assert!(check_status(&RawResponse::new(200, "{}")).is_ok());

        let forbidden = RawResponse::new(
            403,
            r#"{"message":"Forbidden (invalid signature)","status":{"version":"3.0","health":1}}"#,
        );
        match check_status(&forbidden) {
            Err(PtvError::AuthenticationFailed(msg)) => assert!(msg.contains("invalid signature")),
            other => panic!("unexpected: {other:?}"),
        }

        let limited = RawResponse::new(429, "").with_header("Retry-After", "30");
        assert!(matches!(
            check_status(&limited),
            Err(PtvError::RateLimitExceeded {
                retry_after_secs: Some(30)
            })
        ));

        assert!(matches!(
            check_status(&RawResponse::new(503, "")),
            Err(PtvError::ServiceUnavailable(_))
        ));

        match check_status(&RawResponse::new(500, "oops")) {
            Err(PtvError::RequestFailed(msg)) => assert_eq!(msg, "HTTP 500"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_dispatches_signed_url() {
        let expected = signer().sign(&PtvRequest::route_types()).unwrap();

        let mut transport = MockTransport::new();
        transport
            .expect_dispatch()
            .with(eq(expected.as_str().to_string()))
            .times(1)
            .returning(|_| {
                Ok(RawResponse::new(200, r#"{"route_types":[]}"#)
                    .with_header("date", "Mon, 19 Oct 2026 21:15:07 GMT"))
            });

        let client = PtvClient::with_transport(signer(), transport);
        let response = client.get(&PtvRequest::route_types()).await.unwrap();

        assert_eq!(response.url, expected.as_str());
        assert_eq!(response.time, "2026-10-19T21:15:07Z");
        assert!(response.body["route_types"].is_array());
    }

    #[tokio::test]
    async fn test_missing_credentials_never_dispatch() {
        let mut transport = MockTransport::new();
        transport.expect_dispatch().times(0);

        let client = PtvClient::with_transport(UrlSigner::new(), transport);
        let err = client
            .get(&PtvRequest::departures(RouteType::Tram, 2500, QueryParams::new()))
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_dispatch()
            .returning(|_| Ok(RawResponse::new(200, "<html>")));

        let client = PtvClient::with_transport(signer(), transport);
        let err = client.get(&PtvRequest::route(1)).await.unwrap_err();
        assert!(matches!(err, PtvError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let mut transport = MockTransport::new();
        transport
            .expect_dispatch()
            .returning(|_| Err(PtvError::Timeout { timeout_secs: 5 }));

        let client = PtvClient::with_transport(signer(), transport);
        let err = client.get(&PtvRequest::run(1)).await.unwrap_err();
        assert!(matches!(err, PtvError::Timeout { timeout_secs: 5 }));
    }

    #[test]
    fn test_dont_use_https_switches_client_urls() {
        let mut client = PtvClient::with_transport(signer(), MockTransport::new());
        client.dont_use_https();
        let url = client.url(&PtvRequest::route_types()).unwrap();
        assert!(url.as_str().starts_with("http://"));
    }
}
