//! Session and credential types
//!
//! A [`Session`] carries per-user token material. App-level credentials live
//! in [`crate::AuthConfig`]. Both are immutable once handed to a client.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TwitterError};

/// User id reported for guest (logged-out) sessions
pub const LOGGED_OUT_USER_ID: i64 = 0;

/// Token material identifying the caller to the API
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthToken {
    /// OAuth 1.0a user token pair obtained through the login flow
    OAuth1a { token: String, secret: String },
    /// App bearer token plus an activated guest token
    Guest { access_token: String, guest_token: String },
}

impl AuthToken {
    /// Create an OAuth 1.0a user token.
    pub fn oauth1a(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::OAuth1a { token: token.into(), secret: secret.into() }
    }

    /// Create a guest token.
    pub fn guest(access_token: impl Into<String>, guest_token: impl Into<String>) -> Self {
        Self::Guest { access_token: access_token.into(), guest_token: guest_token.into() }
    }

    /// Short label for log fields; never includes token material.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OAuth1a { .. } => "oauth1a",
            Self::Guest { .. } => "guest",
        }
    }

    fn validate(&self) -> Result<()> {
        let (first, second) = match self {
            Self::OAuth1a { token, secret } => (("token", token), ("secret", secret)),
            Self::Guest { access_token, guest_token } => {
                (("access_token", access_token), ("guest_token", guest_token))
            }
        };
        for (field, value) in [first, second] {
            if value.trim().is_empty() {
                return Err(TwitterError::InvalidArgument(format!(
                    "{} auth token has an empty {}",
                    self.kind(),
                    field
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken").field("kind", &self.kind()).finish_non_exhaustive()
    }
}

/// Credential bundle for one user (or guest)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    auth_token: AuthToken,
    id: i64,
    user_name: Option<String>,
}

impl Session {
    /// Session for a logged-in user.
    pub fn user(auth_token: AuthToken, id: i64, user_name: impl Into<String>) -> Self {
        Self { auth_token, id, user_name: Some(user_name.into()) }
    }

    /// Session for a logged-out guest.
    pub fn guest(access_token: impl Into<String>, guest_token: impl Into<String>) -> Self {
        Self {
            auth_token: AuthToken::guest(access_token, guest_token),
            id: LOGGED_OUT_USER_ID,
            user_name: None,
        }
    }

    pub fn auth_token(&self) -> &AuthToken {
        &self.auth_token
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Check that the session carries usable token material.
    ///
    /// # Errors
    /// Returns `TwitterError::InvalidArgument` if any token field is blank.
    pub fn validate(&self) -> Result<()> {
        self.auth_token.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_session_accessors() {
        let session = Session::user(AuthToken::oauth1a("tok", "sec"), 42, "jack");
        assert_eq!(session.id(), 42);
        assert_eq!(session.user_name(), Some("jack"));
        assert_eq!(session.auth_token().kind(), "oauth1a");
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_guest_session_uses_logged_out_id() {
        let session = Session::guest("bearer", "guest");
        assert_eq!(session.id(), LOGGED_OUT_USER_ID);
        assert_eq!(session.user_name(), None);
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_blank_token_is_invalid_argument() {
        let session = Session::user(AuthToken::oauth1a("tok", "  "), 1, "u");
        match session.validate() {
            Err(TwitterError::InvalidArgument(msg)) => assert!(msg.contains("secret")),
            other => panic!("expected invalid argument, got {:?}", other),
        }

        let guest = Session::guest("", "guest");
        assert!(matches!(guest.validate(), Err(TwitterError::InvalidArgument(_))));
    }

    #[test]
    fn test_debug_redacts_token_material() {
        let session = Session::user(AuthToken::oauth1a("visible-token", "visible-secret"), 1, "u");
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("visible-token"));
        assert!(!rendered.contains("visible-secret"));
        assert!(rendered.contains("oauth1a"));
    }
}
