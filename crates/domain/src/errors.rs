//! Error types used throughout the client

use std::time::Duration;

use thiserror::Error;

/// Twitter API error codes that signal an authentication problem even when
/// the HTTP status alone is ambiguous.
const AUTH_ERROR_CODES: &[i64] = &[32, 89, 99, 135, 215];

/// Twitter API error code for "Rate limit exceeded".
const RATE_LIMIT_ERROR_CODE: i64 = 88;

/// Main error type for twitkit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TwitterError {
    /// Malformed construction input (missing session, empty credentials,
    /// missing required call argument).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A service type does not follow the call-description convention, or
    /// the client configuration is unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Response payload does not parse into the declared response shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Network-level failure (connect, TLS, broken body).
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The API answered with a non-success HTTP status.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        /// Twitter error code from the `errors` payload, when present.
        code: Option<i64>,
        message: String,
    },
}

/// Categories of errors for caller-side retry logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidInput,
    Configuration,
    Decode,
    /// Connection, TLS and timeout failures - retryable
    Network,
    /// 401/403 or an auth error code - retry only with new credentials
    Authentication,
    /// 429 or error code 88 - retry with backoff
    RateLimit,
    /// Other 4xx - non-retryable
    Client,
    /// 5xx - retryable
    Server,
}

impl TwitterError {
    /// Get the error category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument(_) => ErrorCategory::InvalidInput,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Decode(_) => ErrorCategory::Decode,
            Self::Transport(_) | Self::Timeout(_) => ErrorCategory::Network,
            Self::Api { status, code, .. } => classify_status(*status, *code),
        }
    }

    /// Check if retrying the same call could succeed.
    ///
    /// Nothing inside the client retries on its own; this is a hint for
    /// callers that implement their own policy.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::RateLimit | ErrorCategory::Server
        )
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Twitter error code of an API error, if the payload carried one.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => *code,
            _ => None,
        }
    }
}

fn classify_status(status: u16, code: Option<i64>) -> ErrorCategory {
    if status == 429 || code == Some(RATE_LIMIT_ERROR_CODE) {
        return ErrorCategory::RateLimit;
    }
    if status == 401 || status == 403 || code.is_some_and(|c| AUTH_ERROR_CODES.contains(&c)) {
        return ErrorCategory::Authentication;
    }
    match status {
        500..=599 => ErrorCategory::Server,
        _ => ErrorCategory::Client,
    }
}

/// Result type alias for twitkit operations
pub type Result<T> = std::result::Result<T, TwitterError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, code: Option<i64>) -> TwitterError {
        TwitterError::Api { status, code, message: "test".to_string() }
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            TwitterError::InvalidArgument("test".to_string()).category(),
            ErrorCategory::InvalidInput
        );
        assert_eq!(
            TwitterError::Configuration("test".to_string()).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(TwitterError::Decode("test".to_string()).category(), ErrorCategory::Decode);
        assert_eq!(TwitterError::Transport("test".to_string()).category(), ErrorCategory::Network);
        assert_eq!(
            TwitterError::Timeout(Duration::from_secs(1)).category(),
            ErrorCategory::Network
        );
    }

    #[test]
    fn test_api_status_classification() {
        assert_eq!(api(401, None).category(), ErrorCategory::Authentication);
        assert_eq!(api(403, None).category(), ErrorCategory::Authentication);
        assert_eq!(api(429, None).category(), ErrorCategory::RateLimit);
        assert_eq!(api(404, None).category(), ErrorCategory::Client);
        assert_eq!(api(503, None).category(), ErrorCategory::Server);
    }

    #[test]
    fn test_api_code_overrides_status() {
        // Twitter has historically returned 400 for rate limiting and bad tokens
        assert_eq!(api(400, Some(88)).category(), ErrorCategory::RateLimit);
        assert_eq!(api(400, Some(89)).category(), ErrorCategory::Authentication);
        assert_eq!(api(400, Some(144)).category(), ErrorCategory::Client);
    }

    #[test]
    fn test_should_retry() {
        assert!(TwitterError::Transport("test".to_string()).is_retryable());
        assert!(TwitterError::Timeout(Duration::from_secs(5)).is_retryable());
        assert!(api(429, None).is_retryable());
        assert!(api(500, None).is_retryable());
        assert!(!api(401, None).is_retryable());
        assert!(!api(404, None).is_retryable());
        assert!(!TwitterError::Decode("test".to_string()).is_retryable());
        assert!(!TwitterError::InvalidArgument("test".to_string()).is_retryable());
    }

    #[test]
    fn test_accessors() {
        let err = api(420, Some(185));
        assert_eq!(err.status(), Some(420));
        assert_eq!(err.api_code(), Some(185));
        assert_eq!(TwitterError::Decode("x".into()).status(), None);
        assert!(err.to_string().contains("HTTP 420"));
    }
}
