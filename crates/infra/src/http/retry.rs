//! Retrying transport decorator
//!
//! Sits outside [`SigningTransport`](crate::auth::SigningTransport) so every
//! attempt is signed again and carries its own nonce and timestamp.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use twitkit_core::{ApiRequest, ApiResponse, HttpTransport};
use twitkit_domain::{Result, TwitterError};

/// Delay before the first retry; doubled for each retry after that
pub const DEFAULT_BASE_BACKOFF: Duration = Duration::from_millis(200);

/// Largest backoff exponent, so the delay stops growing after 256x
const MAX_BACKOFF_SHIFT: u32 = 8;

/// Resends a request after a 5xx answer, a timeout or a transport failure
pub struct RetryingTransport {
    inner: Arc<dyn HttpTransport>,
    max_attempts: usize,
    base_backoff: Duration,
}

impl RetryingTransport {
    /// `max_attempts` counts the first try; values below 1 are treated as 1.
    pub fn new(inner: Arc<dyn HttpTransport>, max_attempts: usize) -> Self {
        Self { inner, max_attempts: max_attempts.max(1), base_backoff: DEFAULT_BASE_BACKOFF }
    }

    pub fn with_base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = u32::try_from(retry_number.saturating_sub(1))
            .unwrap_or(MAX_BACKOFF_SHIFT)
            .min(MAX_BACKOFF_SHIFT);
        self.base_backoff.saturating_mul(1u32 << shift)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

fn should_retry_error(err: &TwitterError) -> bool {
    matches!(err, TwitterError::Timeout(_) | TwitterError::Transport(_))
}

#[async_trait]
impl HttpTransport for RetryingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut attempt = 1;
        loop {
            let last = attempt >= self.max_attempts;
            // The inner stack may sign, so each attempt gets an unsigned copy.
            match self.inner.send(request.clone()).await {
                Ok(response) if response.status >= 500 && !last => {
                    debug!(attempt, status = response.status, "server error, retrying");
                }
                Err(err) if should_retry_error(&err) && !last => {
                    debug!(attempt, error = %err, "request failed, retrying");
                }
                Err(err) => {
                    if attempt > 1 {
                        warn!(attempts = attempt, error = %err, "giving up after retries");
                    }
                    return Err(err);
                }
                Ok(response) => return Ok(response),
            }
            self.sleep_with_backoff(attempt).await;
            attempt += 1;
        }
    }
}

impl fmt::Debug for RetryingTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryingTransport")
            .field("max_attempts", &self.max_attempts)
            .field("base_backoff", &self.base_backoff)
            .finish_non_exhaustive()
    }
}
