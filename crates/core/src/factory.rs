//! Remote call factory
//!
//! Materializes typed service clients from their call descriptions. The
//! factory is cheap to clone and holds only the shared call context.

use std::sync::Arc;

use tracing::debug;
use twitkit_domain::{ApiEndpoint, Result, TwitterError};
use url::Url;

use crate::binding::{CallContext, ServiceBinding};
use crate::codec::JsonCodec;
use crate::descriptor::ServiceDescriptor;
use crate::transport::HttpTransport;

/// A typed client for one remote API surface
///
/// Implementors describe their calls through [`Service::descriptor`]
/// and receive a validated [`ServiceBinding`] to issue them.
pub trait Service: Sized + Send + Sync + 'static {
    fn descriptor() -> &'static ServiceDescriptor;

    fn from_binding(binding: ServiceBinding) -> Self;
}

#[derive(Debug, Clone)]
pub struct RemoteCallFactory {
    context: Arc<CallContext>,
}

impl RemoteCallFactory {
    /// # Errors
    /// Returns `TwitterError::Configuration` if either endpoint URL does
    /// not parse or cannot be used as a base.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        codec: JsonCodec,
        endpoint: &ApiEndpoint,
    ) -> Result<Self> {
        let base_url = parse_base("base", &endpoint.base_url)?;
        let upload_url = parse_base("upload", &endpoint.upload_url)?;
        Ok(Self { context: Arc::new(CallContext { transport, codec, base_url, upload_url }) })
    }

    pub fn base_url(&self) -> &Url {
        &self.context.base_url
    }

    pub fn upload_url(&self) -> &Url {
        &self.context.upload_url
    }

    /// Create a client for service type `S`.
    ///
    /// Each call returns a fresh instance; caching is the registry's job.
    ///
    /// # Errors
    /// Returns `TwitterError::Configuration` if `S`'s call description is
    /// malformed.
    pub fn create<S: Service>(&self) -> Result<S> {
        let descriptor = S::descriptor();
        let compiled = descriptor.compile()?;
        debug!(service = descriptor.name, endpoints = compiled.endpoint_count(), "service created");
        Ok(S::from_binding(ServiceBinding::new(self.context.clone(), Arc::new(compiled))))
    }
}

fn parse_base(label: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| {
        TwitterError::Configuration(format!("invalid {} URL `{}`: {}", label, raw, e))
    })?;
    if url.cannot_be_a_base() {
        return Err(TwitterError::Configuration(format!(
            "{} URL `{}` cannot be used as a base",
            label, raw
        )));
    }
    Ok(url)
}
