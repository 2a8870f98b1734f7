//! PTV client error types

use thiserror::Error;

/// Errors that can occur while building or dispatching PTV requests
#[derive(Debug, Error)]
pub enum PtvError {
    /// Missing credentials, unknown endpoint or an incomplete path template.
    /// Always a caller defect; raised before any network activity.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Connection to the PTV API failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request returned a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The API rejected the developer id or signature
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Failed to read or decode the response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl PtvError {
    /// Returns true if this error came from request construction rather than the network
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigurationError(_))
    }

    /// Returns true if this error was raised by the transport or response handling
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        !self.is_configuration()
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors() {
        assert!(PtvError::ConfigurationError("test".to_string()).is_configuration());
        assert!(!PtvError::ConfigurationError("test".to_string()).is_transport());
    }

    #[test]
    fn test_transport_errors() {
        assert!(PtvError::ConnectionFailed("test".to_string()).is_transport());
        assert!(PtvError::RequestFailed("test".to_string()).is_transport());
        assert!(PtvError::AuthenticationFailed("test".to_string()).is_transport());
        assert!(PtvError::ParseError("test".to_string()).is_transport());
        assert!(PtvError::ServiceUnavailable("test".to_string()).is_transport());
        assert!(PtvError::Timeout { timeout_secs: 5 }.is_transport());
        assert!(
            PtvError::RateLimitExceeded {
                retry_after_secs: None
            }
            .is_transport()
        );
    }

    #[test]
    fn test_error_display() {
        let err = PtvError::configuration("PTV developer ID not set");
        assert_eq!(
            err.to_string(),
            "Configuration error: PTV developer ID not set"
        );

        let err = PtvError::RateLimitExceeded {
            retry_after_secs: Some(60),
        };
        assert!(err.to_string().contains("60"));

        let err = PtvError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));
    }
}
