//! Guest (logged-out) authentication

use std::fmt;

use twitkit_core::ApiRequest;
use twitkit_domain::Result;

use super::RequestSigner;

pub const GUEST_TOKEN_HEADER: &str = "x-guest-token";

/// Sends the app bearer token plus the activated guest token
#[derive(Clone)]
pub struct GuestSigner {
    access_token: String,
    guest_token: String,
}

impl GuestSigner {
    pub fn new(access_token: impl Into<String>, guest_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), guest_token: guest_token.into() }
    }
}

impl RequestSigner for GuestSigner {
    fn sign(&self, request: &mut ApiRequest) -> Result<()> {
        request.set_header("authorization", format!("Bearer {}", self.access_token));
        request.set_header(GUEST_TOKEN_HEADER, self.guest_token.clone());
        Ok(())
    }
}

impl fmt::Debug for GuestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuestSigner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use twitkit_core::HttpMethod;
    use url::Url;

    use super::*;

    #[test]
    fn sets_bearer_and_guest_headers() {
        let mut request = ApiRequest::new(
            HttpMethod::Get,
            Url::parse("https://api.twitter.com/1.1/statuses/show.json?id=1").unwrap(),
        );
        request.set_header("Authorization", "stale");

        GuestSigner::new("AAAA", "1234").sign(&mut request).unwrap();

        assert_eq!(request.header("authorization"), Some("Bearer AAAA"));
        assert_eq!(request.header("X-Guest-Token"), Some("1234"));
        assert_eq!(request.headers.len(), 2);
    }

    #[test]
    fn debug_hides_tokens() {
        let rendered = format!("{:?}", GuestSigner::new("AAAA", "1234"));
        assert!(!rendered.contains("AAAA"));
        assert!(!rendered.contains("1234"));
    }
}
