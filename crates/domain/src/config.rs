//! Configuration management

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TwitterError};

/// Default REST host
pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com";
/// Default media upload host
pub const DEFAULT_UPLOAD_URL: &str = "https://upload.twitter.com";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitConfig {
    pub auth: AuthConfig,
    #[serde(default)]
    pub endpoint: ApiEndpoint,
    #[serde(default)]
    pub tls: TlsConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

impl KitConfig {
    /// Configuration with default endpoint, TLS and transport settings.
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            auth,
            endpoint: ApiEndpoint::default(),
            tls: TlsConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

/// App-level consumer credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub consumer_key: String,
    #[serde(skip_serializing)]
    pub consumer_secret: String,
}

impl AuthConfig {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self { consumer_key: consumer_key.into(), consumer_secret: consumer_secret.into() }
    }

    /// # Errors
    /// Returns `TwitterError::InvalidArgument` if the key or secret is blank.
    pub fn validate(&self) -> Result<()> {
        if self.consumer_key.trim().is_empty() {
            return Err(TwitterError::InvalidArgument("consumer key must not be empty".into()));
        }
        if self.consumer_secret.trim().is_empty() {
            return Err(TwitterError::InvalidArgument("consumer secret must not be empty".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .finish()
    }
}

/// Hosts the client talks to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEndpoint {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_upload_url")]
    pub upload_url: String,
}

impl ApiEndpoint {
    /// Point both hosts at the same server (handy for local mocks).
    pub fn single_host(url: impl Into<String>) -> Self {
        let url = url.into();
        Self { base_url: url.clone(), upload_url: url }
    }
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self { base_url: default_base_url(), upload_url: default_upload_url() }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_upload_url() -> String {
    DEFAULT_UPLOAD_URL.to_string()
}

/// Transport security settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    /// Extra PEM root certificates to trust
    #[serde(default)]
    pub root_certificates: Vec<PathBuf>,
    /// Keep the bundled web PKI roots alongside `root_certificates`
    #[serde(default = "default_true")]
    pub use_builtin_roots: bool,
    /// Refuse plain `http://` URLs
    #[serde(default)]
    pub https_only: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self { root_certificates: Vec::new(), use_builtin_roots: true, https_only: false }
    }
}

fn default_true() -> bool {
    true
}

/// HTTP transport tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Total attempts per request (1 disables retries)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Route through the proxy named by `HTTPS_PROXY`/`HTTP_PROXY`
    #[serde(default = "default_true")]
    pub system_proxy: bool,
}

impl TransportConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
            max_attempts: default_max_attempts(),
            system_proxy: true,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("twitkit/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_attempts() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json_fills_defaults() {
        let config: KitConfig = serde_json::from_str(
            r#"{"auth": {"consumer_key": "key", "consumer_secret": "secret"}}"#,
        )
        .unwrap();

        assert_eq!(config.endpoint.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.endpoint.upload_url, DEFAULT_UPLOAD_URL);
        assert!(config.tls.use_builtin_roots);
        assert!(!config.tls.https_only);
        assert_eq!(config.transport.timeout(), Duration::from_secs(30));
        assert_eq!(config.transport.max_attempts, 1);
        assert!(config.transport.system_proxy);
        assert!(config.transport.user_agent.starts_with("twitkit/"));
    }

    #[test]
    fn test_auth_config_validation() {
        assert!(AuthConfig::new("key", "secret").validate().is_ok());
        assert!(matches!(
            AuthConfig::new("", "secret").validate(),
            Err(TwitterError::InvalidArgument(_))
        ));
        assert!(matches!(
            AuthConfig::new("key", " ").validate(),
            Err(TwitterError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_secret_not_serialized_or_debugged() {
        let auth = AuthConfig::new("key", "super-secret");
        assert!(!format!("{:?}", auth).contains("super-secret"));
        assert!(!serde_json::to_string(&auth).unwrap().contains("super-secret"));
    }

    #[test]
    fn test_single_host_endpoint() {
        let endpoint = ApiEndpoint::single_host("http://127.0.0.1:9000");
        assert_eq!(endpoint.base_url, endpoint.upload_url);
    }
}
