//! Binding of a compiled service to a transport
//!
//! [`ServiceBinding`] turns `(endpoint name, CallArgs)` into an
//! [`ApiRequest`], sends it and decodes the response.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use twitkit_domain::{ApiErrors, Result, TwitterError};
use url::Url;

use crate::codec::JsonCodec;
use crate::descriptor::{CompiledService, Host, ParamLocation};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, MultipartField, RequestBody};

/// State shared by every service created from one factory
pub struct CallContext {
    pub transport: Arc<dyn HttpTransport>,
    pub codec: JsonCodec,
    pub base_url: Url,
    pub upload_url: Url,
}

impl CallContext {
    fn url_for(&self, host: Host) -> &Url {
        match host {
            Host::Api => &self.base_url,
            Host::Upload => &self.upload_url,
        }
    }
}

impl fmt::Debug for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("base_url", &self.base_url.as_str())
            .field("upload_url", &self.upload_url.as_str())
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
enum ArgValue {
    Text(String),
    File { data: Vec<u8>, file_name: Option<String>, content_type: Option<String> },
}

impl fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.debug_tuple("Text").field(value).finish(),
            Self::File { data, file_name, .. } => {
                f.debug_struct("File")
                    .field("len", &data.len())
                    .field("file_name", file_name)
                    .finish()
            }
        }
    }
}

/// Arguments of one call, keyed by declared parameter name
///
/// Setting the same name twice keeps the last value.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    values: Vec<(&'static str, ArgValue)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    fn put(&mut self, name: &'static str, value: ArgValue) {
        self.values.retain(|(existing, _)| *existing != name);
        self.values.push((name, value));
    }

    pub fn arg(mut self, name: &'static str, value: impl ToString) -> Self {
        self.put(name, ArgValue::Text(value.to_string()));
        self
    }

    /// Set the argument only when `value` is present.
    pub fn opt<V: ToString>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.arg(name, value),
            None => self,
        }
    }

    /// Binary multipart part.
    pub fn file(
        mut self,
        name: &'static str,
        data: Vec<u8>,
        file_name: Option<String>,
        content_type: Option<String>,
    ) -> Self {
        self.put(name, ArgValue::File { data, file_name, content_type });
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|(existing, _)| *existing == name)
    }
}

/// A compiled service wired to its call context
#[derive(Debug, Clone)]
pub struct ServiceBinding {
    context: Arc<CallContext>,
    service: Arc<CompiledService>,
}

impl ServiceBinding {
    pub fn new(context: Arc<CallContext>, service: Arc<CompiledService>) -> Self {
        Self { context, service }
    }

    pub fn service_name(&self) -> &'static str {
        self.service.name()
    }

    /// Build the request for `endpoint` without sending it.
    ///
    /// # Errors
    /// - `Configuration` for an unknown endpoint, an undeclared argument or
    ///   a file given for a non-multipart parameter
    /// - `InvalidArgument` if a required argument is missing
    pub fn build_request(&self, endpoint: &str, args: CallArgs) -> Result<ApiRequest> {
        let compiled = self.service.endpoint(endpoint).ok_or_else(|| {
            TwitterError::Configuration(format!(
                "service `{}` has no endpoint `{}`",
                self.service.name(),
                endpoint
            ))
        })?;
        let spec = compiled.spec();

        let mut path_values = HashMap::new();
        let mut query = Vec::new();
        let mut form = Vec::new();
        let mut parts = Vec::new();

        for (name, value) in args.values {
            let param = spec.param(name).ok_or_else(|| {
                TwitterError::Configuration(format!(
                    "endpoint `{}.{}` does not declare argument `{}`",
                    self.service.name(),
                    spec.name,
                    name
                ))
            })?;

            match (param.location, value) {
                (ParamLocation::Path, ArgValue::Text(v)) => {
                    path_values.insert(name, v);
                }
                (ParamLocation::Query, ArgValue::Text(v)) => query.push((name, v)),
                (ParamLocation::Form, ArgValue::Text(v)) => form.push((name.to_string(), v)),
                (ParamLocation::Multipart, ArgValue::Text(v)) => {
                    parts.push(MultipartField::text(name, v))
                }
                (ParamLocation::Multipart, ArgValue::File { data, file_name, content_type }) => {
                    parts.push(MultipartField {
                        name: name.to_string(),
                        data,
                        file_name,
                        content_type,
                    })
                }
                (location, ArgValue::File { .. }) => {
                    return Err(TwitterError::Configuration(format!(
                        "argument `{}` of `{}.{}` is a {:?} parameter and cannot carry a file",
                        name,
                        self.service.name(),
                        spec.name,
                        location
                    )));
                }
            }
        }

        let provided = |name: &str| {
            path_values.contains_key(name)
                || query.iter().any(|(n, _)| *n == name)
                || form.iter().any(|(n, _)| n == name)
                || parts.iter().any(|p| p.name == name)
        };
        if let Some(missing) = spec.params.iter().find(|p| p.required && !provided(p.name)) {
            return Err(TwitterError::InvalidArgument(format!(
                "`{}.{}` requires argument `{}`",
                self.service.name(),
                spec.name,
                missing.name
            )));
        }

        // Placeholders and path params are matched at compile time
        let path = compiled.render_path(&path_values).ok_or_else(|| {
            TwitterError::Configuration(format!("unresolved path for `{}`", spec.name))
        })?;
        let base = self.context.url_for(spec.host);
        let mut url = Url::parse(&format!("{}{}", base.as_str().trim_end_matches('/'), path))
            .map_err(|e| TwitterError::Configuration(format!("invalid request URL: {}", e)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &query {
                pairs.append_pair(name, value);
            }
        }

        let mut request = ApiRequest::new(spec.method, url);
        request.body = if !parts.is_empty() {
            RequestBody::Multipart(parts)
        } else if !form.is_empty() {
            RequestBody::Form(form)
        } else {
            RequestBody::Empty
        };
        Ok(request)
    }

    /// Build, send and decode one call.
    ///
    /// # Errors
    /// Anything from [`Self::build_request`], transport failures,
    /// `TwitterError::Api` for non-success statuses and
    /// `TwitterError::Decode` for bodies that do not match `T`.
    #[instrument(skip(self, args), fields(service = self.service.name()))]
    pub async fn invoke<T: DeserializeOwned>(&self, endpoint: &str, args: CallArgs) -> Result<T> {
        let request = self.build_request(endpoint, args)?;
        debug!(method = %request.method, url = %request.redacted_url(), "sending request");

        let response = self.context.transport.send(request).await?;
        if !response.is_success() {
            let error = api_error(&self.context.codec, &response);
            warn!(status = response.status, error = %error, "request rejected");
            return Err(error);
        }

        self.context.codec.decode(&response.body)
    }
}

/// Map a non-success response to `TwitterError::Api`.
///
/// Prefers the `{"errors": [...]}` payload, then the raw body, then the
/// status reason phrase.
pub fn api_error(codec: &JsonCodec, response: &ApiResponse) -> TwitterError {
    if let Ok(errors) = codec.decode::<ApiErrors>(&response.body) {
        if let Some(first) = errors.first() {
            return TwitterError::Api {
                status: response.status,
                code: Some(first.code),
                message: first.message.clone(),
            };
        }
    }

    let text = response.body_text();
    let message = if text.trim().is_empty() {
        reason_phrase(response.status).to_string()
    } else {
        text.trim().to_string()
    };
    TwitterError::Api { status: response.status, code: None, message }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        406 => "Not Acceptable",
        410 => "Gone",
        413 => "Payload Too Large",
        420 => "Enhance Your Calm",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unexpected status",
    }
}
