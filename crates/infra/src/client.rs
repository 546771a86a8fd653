//! Twitter REST client façade
//!
//! A [`TwitterApiClient`] is bound to one [`Session`]. Every request it
//! sends goes through a [`SigningTransport`], and each service interface is
//! built at most once per client through a [`ServiceRegistry`].

use std::sync::Arc;

use tracing::info;
use twitkit_core::{
    AccountService, CollectionService, ConfigurationService, FavoriteService, HttpTransport,
    JsonCodec, ListService, MediaService, RemoteCallFactory, SearchService, Service,
    ServiceRegistry, StatusesService,
};
use twitkit_domain::{
    ApiEndpoint, AuthConfig, AuthToken, Result, Session, TlsConfig, TransportConfig, TwitterError,
};

use crate::auth::{signer_for, SigningTransport};
use crate::defaults::DefaultsProvider;
use crate::http::{ReqwestTransport, RetryingTransport};

/// Entry point for calling the Twitter REST API as one session
pub struct TwitterApiClient {
    session: Session,
    registry: ServiceRegistry,
}

impl TwitterApiClient {
    /// Create a client that talks to `endpoint` over a default reqwest
    /// transport.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the session or the consumer credentials are
    /// blank, `Configuration` if the endpoint URLs or TLS settings are
    /// unusable.
    pub fn new(
        auth_config: AuthConfig,
        session: Session,
        endpoint: ApiEndpoint,
        tls: TlsConfig,
    ) -> Result<Self> {
        Self::builder()
            .auth_config(auth_config)
            .session(session)
            .endpoint(endpoint)
            .tls(tls)
            .build()
    }

    /// Create a client with everything except the session taken from
    /// `provider`.
    pub fn from_defaults(provider: &dyn DefaultsProvider, session: Session) -> Result<Self> {
        Self::builder()
            .auth_config(provider.auth_config())
            .session(session)
            .endpoint(provider.api_endpoint())
            .tls(provider.tls_config())
            .transport_config(provider.transport_config())
            .build()
    }

    pub fn builder() -> TwitterApiClientBuilder {
        TwitterApiClientBuilder::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get the shared instance of a service interface, creating it on
    /// first use.
    ///
    /// # Errors
    ///
    /// `Configuration` if the service's call description is malformed.
    pub fn service<S: Service>(&self) -> Result<Arc<S>> {
        self.registry.get::<S>()
    }

    pub fn account(&self) -> Result<Arc<AccountService>> {
        self.service::<AccountService>()
    }

    pub fn favorites(&self) -> Result<Arc<FavoriteService>> {
        self.service::<FavoriteService>()
    }

    pub fn statuses(&self) -> Result<Arc<StatusesService>> {
        self.service::<StatusesService>()
    }

    pub fn search(&self) -> Result<Arc<SearchService>> {
        self.service::<SearchService>()
    }

    pub fn lists(&self) -> Result<Arc<ListService>> {
        self.service::<ListService>()
    }

    pub fn collections(&self) -> Result<Arc<CollectionService>> {
        self.service::<CollectionService>()
    }

    pub fn configuration(&self) -> Result<Arc<ConfigurationService>> {
        self.service::<ConfigurationService>()
    }

    pub fn media(&self) -> Result<Arc<MediaService>> {
        self.service::<MediaService>()
    }
}

impl std::fmt::Debug for TwitterApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterApiClient")
            .field("session", &self.session)
            .field("services", &self.registry.len())
            .finish()
    }
}

/// Builder for [`TwitterApiClient`]
#[derive(Default)]
pub struct TwitterApiClientBuilder {
    auth_config: Option<AuthConfig>,
    session: Option<Session>,
    endpoint: Option<ApiEndpoint>,
    tls: Option<TlsConfig>,
    transport_config: Option<TransportConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl TwitterApiClientBuilder {
    pub fn auth_config(mut self, auth_config: AuthConfig) -> Self {
        self.auth_config = Some(auth_config);
        self
    }

    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn endpoint(mut self, endpoint: ApiEndpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    pub fn transport_config(mut self, transport_config: TransportConfig) -> Self {
        self.transport_config = Some(transport_config);
        self
    }

    /// Send through `transport` instead of a reqwest client. Requests are
    /// still signed before they reach it, and retried per
    /// `transport_config.max_attempts`.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// # Errors
    ///
    /// `InvalidArgument` if no session was given or its tokens are blank.
    /// An OAuth 1.0a session also needs consumer credentials.
    pub fn build(self) -> Result<TwitterApiClient> {
        let session = self
            .session
            .ok_or_else(|| TwitterError::InvalidArgument("session must be provided".into()))?;

        let auth_config = match (self.auth_config, session.auth_token()) {
            (Some(auth_config), _) => auth_config,
            // Guest requests carry their own bearer token.
            (None, AuthToken::Guest { .. }) => AuthConfig::new("", ""),
            (None, AuthToken::OAuth1a { .. }) => {
                return Err(TwitterError::InvalidArgument(
                    "auth config must be provided for an OAuth 1.0a session".into(),
                ))
            }
        };

        // Credentials are checked before any transport or factory is built.
        let signer = signer_for(&auth_config, &session)?;

        let endpoint = self.endpoint.unwrap_or_default();
        let transport_config = self.transport_config.unwrap_or_default();
        let inner: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::from_config(
                &transport_config,
                &self.tls.unwrap_or_default(),
            )?),
        };

        let signing: Arc<dyn HttpTransport> = Arc::new(
            SigningTransport::with_signer(inner, signer).labelled(session.auth_token().kind()),
        );
        let transport: Arc<dyn HttpTransport> = if transport_config.max_attempts > 1 {
            Arc::new(RetryingTransport::new(signing, transport_config.max_attempts))
        } else {
            signing
        };
        let factory = RemoteCallFactory::new(transport, JsonCodec::new(), &endpoint)?;

        info!(
            auth = session.auth_token().kind(),
            user_id = session.id(),
            base_url = %endpoint.base_url,
            "twitter api client ready"
        );

        Ok(TwitterApiClient { session, registry: ServiceRegistry::new(factory) })
    }
}
