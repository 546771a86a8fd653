//! Call descriptions
//!
//! A service declares its remote operations as static data: one
//! [`EndpointSpec`] per call (verb, host, path template, parameters).
//! [`ServiceDescriptor::compile`] checks the declaration and pre-parses
//! path templates so that invocations only have to fill in values.

use std::collections::{HashMap, HashSet};

use twitkit_domain::{Result, TwitterError};

use crate::transport::HttpMethod;

/// Which configured host an endpoint lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Host {
    /// REST host (`ApiEndpoint::base_url`)
    Api,
    /// Media upload host (`ApiEndpoint::upload_url`)
    Upload,
}

/// Where an argument is placed in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// Substituted into a `{name}` placeholder of the path template
    Path,
    Query,
    /// `application/x-www-form-urlencoded` body field
    Form,
    /// `multipart/form-data` body part
    Multipart,
}

impl ParamLocation {
    fn is_body(self) -> bool {
        matches!(self, Self::Form | Self::Multipart)
    }
}

/// Declared parameter of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub location: ParamLocation,
    pub required: bool,
}

impl ParamSpec {
    pub const fn path(name: &'static str) -> Self {
        Self { name, location: ParamLocation::Path, required: true }
    }

    pub const fn query(name: &'static str) -> Self {
        Self { name, location: ParamLocation::Query, required: false }
    }

    pub const fn required_query(name: &'static str) -> Self {
        Self { name, location: ParamLocation::Query, required: true }
    }

    pub const fn form(name: &'static str) -> Self {
        Self { name, location: ParamLocation::Form, required: false }
    }

    pub const fn required_form(name: &'static str) -> Self {
        Self { name, location: ParamLocation::Form, required: true }
    }

    pub const fn multipart(name: &'static str) -> Self {
        Self { name, location: ParamLocation::Multipart, required: false }
    }
}

/// One remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSpec {
    pub name: &'static str,
    pub method: HttpMethod,
    pub host: Host,
    /// Absolute path, e.g. `/1.1/statuses/retweet/{id}.json`
    pub path: &'static str,
    pub params: &'static [ParamSpec],
}

impl EndpointSpec {
    pub const fn new(
        name: &'static str,
        method: HttpMethod,
        path: &'static str,
        params: &'static [ParamSpec],
    ) -> Self {
        Self { name, method, host: Host::Api, path, params }
    }

    pub const fn get(name: &'static str, path: &'static str, params: &'static [ParamSpec]) -> Self {
        Self::new(name, HttpMethod::Get, path, params)
    }

    pub const fn post(
        name: &'static str,
        path: &'static str,
        params: &'static [ParamSpec],
    ) -> Self {
        Self::new(name, HttpMethod::Post, path, params)
    }

    /// Move the endpoint to the media upload host.
    pub const fn on_upload_host(self) -> Self {
        Self { host: Host::Upload, ..self }
    }

    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Declared shape of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub name: &'static str,
    pub endpoints: &'static [EndpointSpec],
}

impl ServiceDescriptor {
    /// Validate the declaration and build the endpoint table.
    ///
    /// # Errors
    /// Returns `TwitterError::Configuration` describing the first rule the
    /// declaration breaks.
    pub fn compile(&self) -> Result<CompiledService> {
        if self.name.trim().is_empty() {
            return Err(TwitterError::Configuration("service name must not be empty".into()));
        }
        if self.endpoints.is_empty() {
            return Err(config_error(self.name, None, "declares no endpoints"));
        }

        let mut endpoints = HashMap::with_capacity(self.endpoints.len());
        for spec in self.endpoints {
            if spec.name.trim().is_empty() {
                return Err(config_error(self.name, None, "has an endpoint with an empty name"));
            }
            let compiled = compile_endpoint(spec)
                .map_err(|reason| config_error(self.name, Some(spec.name), &reason))?;
            if endpoints.insert(spec.name, compiled).is_some() {
                return Err(config_error(self.name, Some(spec.name), "is declared twice"));
            }
        }

        Ok(CompiledService { name: self.name, endpoints })
    }
}

fn config_error(service: &str, endpoint: Option<&str>, reason: &str) -> TwitterError {
    match endpoint {
        Some(endpoint) => TwitterError::Configuration(format!(
            "service `{}` endpoint `{}` {}",
            service, endpoint, reason
        )),
        None => TwitterError::Configuration(format!("service `{}` {}", service, reason)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

fn parse_template(path: &'static str) -> std::result::Result<Vec<Segment>, String> {
    if !path.starts_with('/') {
        return Err(format!("path `{}` must start with '/'", path));
    }

    let mut segments = Vec::new();
    let mut rest = path;
    while !rest.is_empty() {
        let Some(open) = rest.find(|c| c == '{' || c == '}') else {
            segments.push(Segment::Literal(rest));
            break;
        };
        if rest[open..].starts_with('}') {
            return Err(format!("path `{}` has an unbalanced '}}'", path));
        }
        if open > 0 {
            segments.push(Segment::Literal(&rest[..open]));
        }

        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| format!("path `{}` has an unclosed '{{'", path))?;
        let name = &after[..close];
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!("path `{}` has an invalid placeholder `{{{}}}`", path, name));
        }
        segments.push(Segment::Param(name));
        rest = &after[close + 1..];
    }

    Ok(segments)
}

fn compile_endpoint(spec: &'static EndpointSpec) -> std::result::Result<CompiledEndpoint, String> {
    let segments = parse_template(spec.path)?;

    let mut seen = HashSet::new();
    for param in spec.params {
        if param.name.is_empty() {
            return Err("declares a parameter with an empty name".into());
        }
        if !seen.insert(param.name) {
            return Err(format!("declares parameter `{}` twice", param.name));
        }
        if param.location.is_body() && !spec.method.allows_body() {
            return Err(format!(
                "declares body parameter `{}` on a {} request",
                param.name, spec.method
            ));
        }
    }

    let has_form = spec.params.iter().any(|p| p.location == ParamLocation::Form);
    let has_multipart = spec.params.iter().any(|p| p.location == ParamLocation::Multipart);
    if has_form && has_multipart {
        return Err("mixes form and multipart parameters".into());
    }

    let placeholders: HashSet<&str> = segments
        .iter()
        .filter_map(|s| match s {
            Segment::Param(name) => Some(*name),
            Segment::Literal(_) => None,
        })
        .collect();
    for placeholder in &placeholders {
        if !spec.params.iter().any(|p| p.name == *placeholder && p.location == ParamLocation::Path)
        {
            return Err(format!("placeholder `{{{}}}` has no path parameter", placeholder));
        }
    }
    for param in spec.params.iter().filter(|p| p.location == ParamLocation::Path) {
        if !placeholders.contains(param.name) {
            return Err(format!("path parameter `{}` does not appear in the path", param.name));
        }
    }

    Ok(CompiledEndpoint { spec, segments })
}

/// Endpoint with a pre-parsed path template
#[derive(Debug, Clone)]
pub struct CompiledEndpoint {
    spec: &'static EndpointSpec,
    segments: Vec<Segment>,
}

impl CompiledEndpoint {
    pub fn spec(&self) -> &'static EndpointSpec {
        self.spec
    }

    /// Fill path placeholders with percent-encoded values.
    ///
    /// Every placeholder must be present in `values`.
    pub(crate) fn render_path(&self, values: &HashMap<&str, String>) -> Option<String> {
        let mut path = String::with_capacity(self.spec.path.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Param(name) => path.push_str(&urlencoding::encode(values.get(name)?)),
            }
        }
        Some(path)
    }
}

/// Validated endpoint table of one service
#[derive(Debug, Clone)]
pub struct CompiledService {
    name: &'static str,
    endpoints: HashMap<&'static str, CompiledEndpoint>,
}

impl CompiledService {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn endpoint(&self, name: &str) -> Option<&CompiledEndpoint> {
        self.endpoints.get(name)
    }

    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(endpoints: &'static [EndpointSpec]) -> Result<CompiledService> {
        ServiceDescriptor { name: "test", endpoints }.compile()
    }

    fn expect_config_error(result: Result<CompiledService>, needle: &str) {
        match result {
            Err(TwitterError::Configuration(msg)) => {
                assert!(msg.contains(needle), "message `{}` should mention `{}`", msg, needle)
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_descriptor_compiles() {
        static ENDPOINTS: &[EndpointSpec] = &[
            EndpointSpec::get(
                "show",
                "/1.1/statuses/show.json",
                &[ParamSpec::required_query("id")],
            ),
            EndpointSpec::post(
                "retweet",
                "/1.1/statuses/retweet/{id}.json",
                &[ParamSpec::path("id"), ParamSpec::form("trim_user")],
            ),
        ];
        let service = compile(ENDPOINTS).unwrap();
        assert_eq!(service.name(), "test");
        assert_eq!(service.endpoint_count(), 2);
        assert!(service.endpoint("retweet").is_some());
        assert!(service.endpoint("missing").is_none());
    }

    #[test]
    fn test_render_path_encodes_values() {
        static ENDPOINTS: &[EndpointSpec] =
            &[EndpointSpec::get("e", "/1.1/lists/{slug}/members.json", &[ParamSpec::path("slug")])];
        let service = compile(ENDPOINTS).unwrap();
        let endpoint = service.endpoint("e").unwrap();

        let values = HashMap::from([("slug", "a b/c".to_string())]);
        assert_eq!(endpoint.render_path(&values).unwrap(), "/1.1/lists/a%20b%2Fc/members.json");
        assert!(endpoint.render_path(&HashMap::new()).is_none());
    }

    #[test]
    fn test_empty_descriptor_rejected() {
        expect_config_error(compile(&[]), "no endpoints");
        expect_config_error(ServiceDescriptor { name: " ", endpoints: &[] }.compile(), "name");
    }

    #[test]
    fn test_duplicate_endpoint_rejected() {
        static ENDPOINTS: &[EndpointSpec] =
            &[EndpointSpec::get("a", "/x.json", &[]), EndpointSpec::get("a", "/y.json", &[])];
        expect_config_error(compile(ENDPOINTS), "declared twice");
    }

    #[test]
    fn test_bad_templates_rejected() {
        static RELATIVE: &[EndpointSpec] = &[EndpointSpec::get("a", "x.json", &[])];
        expect_config_error(compile(RELATIVE), "must start with");

        static UNCLOSED: &[EndpointSpec] =
            &[EndpointSpec::get("a", "/x/{id.json", &[ParamSpec::path("id")])];
        expect_config_error(compile(UNCLOSED), "unclosed");

        static STRAY: &[EndpointSpec] = &[EndpointSpec::get("a", "/x/}id.json", &[])];
        expect_config_error(compile(STRAY), "unbalanced");

        static EMPTY: &[EndpointSpec] = &[EndpointSpec::get("a", "/x/{}.json", &[])];
        expect_config_error(compile(EMPTY), "invalid placeholder");
    }

    #[test]
    fn test_placeholder_and_path_param_must_match() {
        static MISSING_PARAM: &[EndpointSpec] = &[EndpointSpec::get("a", "/x/{id}.json", &[])];
        expect_config_error(compile(MISSING_PARAM), "has no path parameter");

        static UNUSED_PARAM: &[EndpointSpec] =
            &[EndpointSpec::get("a", "/x.json", &[ParamSpec::path("id")])];
        expect_config_error(compile(UNUSED_PARAM), "does not appear");
    }

    #[test]
    fn test_body_rules() {
        static GET_WITH_FORM: &[EndpointSpec] =
            &[EndpointSpec::get("a", "/x.json", &[ParamSpec::form("status")])];
        expect_config_error(compile(GET_WITH_FORM), "body parameter");

        static MIXED: &[EndpointSpec] = &[EndpointSpec::post(
            "a",
            "/x.json",
            &[ParamSpec::form("status"), ParamSpec::multipart("media")],
        )];
        expect_config_error(compile(MIXED), "mixes");

        static DUPLICATE: &[EndpointSpec] = &[EndpointSpec::post(
            "a",
            "/x.json",
            &[ParamSpec::form("id"), ParamSpec::query("id")],
        )];
        expect_config_error(compile(DUPLICATE), "twice");
    }

    #[test]
    fn test_upload_host_flag() {
        let spec = EndpointSpec::post("upload", "/1.1/media/upload.json", &[]).on_upload_host();
        assert_eq!(spec.host, Host::Upload);
        assert_eq!(spec.method, HttpMethod::Post);
    }
}
