//! JSON codec shared by every service of a client
//!
//! Null-tolerance for collections is declared on the models themselves
//! (see `twitkit_domain::models`); the codec adds the transport-level
//! rules: empty bodies decode as `null`, and genuinely malformed JSON is
//! surfaced as [`TwitterError::Decode`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use twitkit_domain::{Result, TwitterError};

/// Stateless JSON encoder/decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }

    /// Decode a response body.
    ///
    /// # Errors
    /// Returns `TwitterError::Decode` if the body is not valid JSON or does
    /// not match the shape of `T`.
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T> {
        // 204/205 and friends have no body by RFC; let `()`/`Option<T>` through
        if body.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_value(Value::Null).map_err(|e| {
                TwitterError::Decode(format!("empty response body cannot be decoded: {}", e))
            });
        }

        serde_json::from_slice(body).map_err(|e| {
            TwitterError::Decode(format!(
                "invalid payload at line {} column {}: {}",
                e.line(),
                e.column(),
                e
            ))
        })
    }

    /// # Errors
    /// Returns `TwitterError::Decode` if `value` cannot be represented as
    /// JSON (e.g. a map with non-string keys).
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value)
            .map_err(|e| TwitterError::Decode(format!("failed to encode payload: {}", e)))
    }
}
