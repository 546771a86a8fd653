//! Source of client defaults
//!
//! [`TwitterApiClient::from_defaults`](crate::TwitterApiClient::from_defaults)
//! reads app credentials and connection settings from a provider instead of
//! taking them one by one.

use twitkit_domain::{ApiEndpoint, AuthConfig, KitConfig, TlsConfig, TransportConfig};

pub trait DefaultsProvider: Send + Sync {
    fn auth_config(&self) -> AuthConfig;

    fn api_endpoint(&self) -> ApiEndpoint {
        ApiEndpoint::default()
    }

    fn tls_config(&self) -> TlsConfig {
        TlsConfig::default()
    }

    fn transport_config(&self) -> TransportConfig {
        TransportConfig::default()
    }
}

impl DefaultsProvider for KitConfig {
    fn auth_config(&self) -> AuthConfig {
        self.auth.clone()
    }

    fn api_endpoint(&self) -> ApiEndpoint {
        self.endpoint.clone()
    }

    fn tls_config(&self) -> TlsConfig {
        self.tls.clone()
    }

    fn transport_config(&self) -> TransportConfig {
        self.transport.clone()
    }
}
