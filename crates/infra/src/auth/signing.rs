//! Signing transport decorator

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use twitkit_core::{ApiRequest, ApiResponse, HttpTransport};
use twitkit_domain::{AuthConfig, Result, Session};

use super::{signer_for, RequestSigner};

/// Wraps a transport so that every request is signed just before sending
///
/// Every call through `send` is signed again, so retries must wrap this
/// transport rather than sit inside it. See
/// [`RetryingTransport`](crate::http::RetryingTransport).
pub struct SigningTransport {
    inner: Arc<dyn HttpTransport>,
    signer: Arc<dyn RequestSigner>,
    auth_kind: &'static str,
}

impl SigningTransport {
    /// # Errors
    /// `InvalidArgument` if the session or the consumer credentials are
    /// blank. Nothing is sent in that case.
    pub fn new(
        inner: Arc<dyn HttpTransport>,
        auth_config: &AuthConfig,
        session: &Session,
    ) -> Result<Self> {
        let signer = signer_for(auth_config, session)?;
        Ok(Self { inner, signer, auth_kind: session.auth_token().kind() })
    }

    /// Use a custom signer.
    pub fn with_signer(inner: Arc<dyn HttpTransport>, signer: Arc<dyn RequestSigner>) -> Self {
        Self { inner, signer, auth_kind: "custom" }
    }

    /// Name the auth scheme reported in logs.
    pub(crate) fn labelled(mut self, auth_kind: &'static str) -> Self {
        self.auth_kind = auth_kind;
        self
    }
}

#[async_trait]
impl HttpTransport for SigningTransport {
    async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        self.signer.sign(&mut request)?;
        debug!(
            auth = self.auth_kind,
            method = %request.method,
            url = %request.redacted_url(),
            "request signed"
        );
        self.inner.send(request).await
    }
}

impl fmt::Debug for SigningTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningTransport").field("auth", &self.auth_kind).finish_non_exhaustive()
    }
}
