//! Request authentication
//!
//! A [`RequestSigner`] adds credentials to an outgoing [`ApiRequest`].
//! [`SigningTransport`] wraps any transport and signs each request right
//! before it is sent.

pub mod guest;
pub mod oauth1;
pub mod signing;

pub use guest::GuestSigner;
pub use oauth1::OAuth1Signer;
pub use signing::SigningTransport;

use std::sync::Arc;

use twitkit_core::ApiRequest;
use twitkit_domain::{AuthConfig, AuthToken, Result, Session};

/// Adds authentication to a request
///
/// Signing must not be cached: every call produces fresh credentials for
/// the request as it is at that moment.
pub trait RequestSigner: Send + Sync {
    fn sign(&self, request: &mut ApiRequest) -> Result<()>;
}

/// Pick the signer matching the session's token kind.
///
/// # Errors
/// `InvalidArgument` if the session or the app credentials are blank.
pub fn signer_for(auth_config: &AuthConfig, session: &Session) -> Result<Arc<dyn RequestSigner>> {
    session.validate()?;
    Ok(match session.auth_token() {
        AuthToken::OAuth1a { token, secret } => {
            auth_config.validate()?;
            Arc::new(OAuth1Signer::new(auth_config, token.clone(), secret.clone()))
        }
        AuthToken::Guest { access_token, guest_token } => {
            Arc::new(GuestSigner::new(access_token.clone(), guest_token.clone()))
        }
    })
}
