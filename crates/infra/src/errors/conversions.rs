//! Conversions from external infrastructure errors into domain errors.

use std::time::Duration;

use reqwest::Error as HttpError;
use twitkit_domain::TwitterError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TwitterError);

impl From<InfraError> for TwitterError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TwitterError> for InfraError {
    fn from(value: TwitterError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoTwitterError {
    fn into_twitter(self, timeout: Duration) -> TwitterError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TwitterError */
/* -------------------------------------------------------------------------- */

impl IntoTwitterError for HttpError {
    fn into_twitter(self, timeout: Duration) -> TwitterError {
        if self.is_timeout() {
            return TwitterError::Timeout(timeout);
        }

        if self.is_builder() {
            return TwitterError::Configuration(format!("invalid HTTP request: {}", self));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return TwitterError::Transport(format!("HTTP connection failure: {}", self));
        }

        if self.is_body() || self.is_decode() {
            return TwitterError::Transport(format!("failed to read response body: {}", self));
        }

        TwitterError::Transport(self.to_string())
    }
}

impl InfraError {
    /// Map a reqwest failure; `timeout` is the configured limit that a
    /// timed-out request ran into.
    pub fn from_http(err: HttpError, timeout: Duration) -> Self {
        InfraError(err.into_twitter(timeout))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_twitter(Duration::ZERO))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
