use std::fs;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Certificate, Client as ReqwestClient, Method, RequestBuilder};
use tracing::debug;
use twitkit_core::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, RequestBody};
use twitkit_domain::{Result, TlsConfig, TransportConfig, TwitterError};

use crate::errors::InfraError;

/// `HttpTransport` backed by reqwest with timeout support.
///
/// Sends each request exactly once. Retries belong in
/// [`RetryingTransport`](super::RetryingTransport), outside the signer.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: ReqwestClient,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Start building a new transport.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Transport configured from the client settings.
    pub fn from_config(transport: &TransportConfig, tls: &TlsConfig) -> Result<Self> {
        Self::builder()
            .timeout(transport.timeout())
            .connect_timeout(transport.connect_timeout())
            .user_agent(transport.user_agent.clone())
            .system_proxy(transport.system_proxy)
            .tls(tls.clone())
            .build()
    }

    fn prepare(&self, request: &ApiRequest) -> Result<RequestBuilder> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        };

        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(pairs) => builder.form(pairs),
            RequestBody::Multipart(fields) => {
                let mut form = Form::new();
                for field in fields {
                    let mut part = Part::bytes(field.data.clone());
                    if let Some(file_name) = &field.file_name {
                        part = part.file_name(file_name.clone());
                    }
                    if let Some(content_type) = &field.content_type {
                        part = part.mime_str(content_type).map_err(|e| {
                            TwitterError::InvalidArgument(format!(
                                "invalid content type `{}` for part `{}`: {}",
                                content_type, field.name, e
                            ))
                        })?;
                    }
                    form = form.part(field.name.clone(), part);
                }
                builder.multipart(form)
            }
        };

        Ok(builder)
    }

    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = request.redacted_url();
        let method = request.method;
        debug!(%method, %url, "sending HTTP request");

        let response = self.prepare(request)?.send().await.map_err(|err| {
            debug!(%method, %url, error = %err, "HTTP request failed");
            TwitterError::from(InfraError::from_http(err, self.timeout))
        })?;

        let status = response.status();
        debug!(%method, %url, %status, "received HTTP response");

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| TwitterError::from(InfraError::from_http(e, self.timeout)))?;

        Ok(ApiResponse { status: status.as_u16(), headers, body: body.to_vec() })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.execute(&request).await
    }
}

/// Builder for [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestTransportBuilder {
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: Option<String>,
    system_proxy: bool,
    tls: TlsConfig,
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        let defaults = TransportConfig::default();
        Self {
            timeout: defaults.timeout(),
            connect_timeout: defaults.connect_timeout(),
            user_agent: Some(defaults.user_agent),
            system_proxy: defaults.system_proxy,
            tls: TlsConfig::default(),
        }
    }
}

impl ReqwestTransportBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Whether to honor the proxy environment variables (on by default).
    pub fn system_proxy(mut self, enabled: bool) -> Self {
        self.system_proxy = enabled;
        self
    }

    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    /// # Errors
    /// `Configuration` if a root certificate cannot be read or parsed, or if
    /// the TLS backend rejects the settings.
    pub fn build(self) -> Result<ReqwestTransport> {
        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .tls_built_in_root_certs(self.tls.use_builtin_roots)
            .https_only(self.tls.https_only);

        if !self.system_proxy {
            builder = builder.no_proxy();
        }

        for path in &self.tls.root_certificates {
            let pem = fs::read(path).map_err(|e| {
                TwitterError::Configuration(format!(
                    "failed to read root certificate {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let certificate = Certificate::from_pem(&pem).map_err(|e| {
                TwitterError::Configuration(format!(
                    "invalid root certificate {}: {}",
                    path.display(),
                    e
                ))
            })?;
            builder = builder.add_root_certificate(certificate);
        }

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| {
            TwitterError::Configuration(format!("failed to build HTTP client: {}", err))
        })?;

        Ok(ReqwestTransport { client, timeout: self.timeout })
    }
}
