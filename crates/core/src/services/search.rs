//! `search/tweets`

use std::fmt;

use twitkit_domain::{Result, Search, TwitterError};

use crate::binding::{CallArgs, ServiceBinding};
use crate::descriptor::{EndpointSpec, ParamSpec, ServiceDescriptor};
use crate::factory::Service;

static DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: "search",
    endpoints: &[EndpointSpec::get(
        "tweets",
        "/1.1/search/tweets.json",
        &[
            ParamSpec::required_query("q"),
            ParamSpec::query("geocode"),
            ParamSpec::query("lang"),
            ParamSpec::query("locale"),
            ParamSpec::query("result_type"),
            ParamSpec::query("count"),
            ParamSpec::query("until"),
            ParamSpec::query("since_id"),
            ParamSpec::query("max_id"),
            ParamSpec::query("include_entities"),
        ],
    )],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    Mixed,
    Recent,
    Popular,
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mixed => "mixed",
            Self::Recent => "recent",
            Self::Popular => "popular",
        })
    }
}

/// Standard search query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    /// `latitude,longitude,radius`, e.g. `37.781157,-122.398720,1mi`
    pub geocode: Option<String>,
    pub lang: Option<String>,
    pub locale: Option<String>,
    pub result_type: Option<ResultType>,
    pub count: Option<u32>,
    /// `YYYY-MM-DD`
    pub until: Option<String>,
    pub since_id: Option<i64>,
    pub max_id: Option<i64>,
    pub include_entities: Option<bool>,
}

impl SearchQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self { q: q.into(), ..Self::default() }
    }

    pub fn result_type(mut self, result_type: ResultType) -> Self {
        self.result_type = Some(result_type);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }
}

#[derive(Debug)]
pub struct SearchService {
    binding: ServiceBinding,
}

impl Service for SearchService {
    fn descriptor() -> &'static ServiceDescriptor {
        &DESCRIPTOR
    }

    fn from_binding(binding: ServiceBinding) -> Self {
        Self { binding }
    }
}

impl SearchService {
    /// # Errors
    /// `InvalidArgument` for a blank query.
    pub async fn tweets(&self, query: &SearchQuery) -> Result<Search> {
        if query.q.trim().is_empty() {
            return Err(TwitterError::InvalidArgument("search query must not be blank".into()));
        }
        let args = CallArgs::new()
            .arg("q", &query.q)
            .opt("geocode", query.geocode.as_ref())
            .opt("lang", query.lang.as_ref())
            .opt("locale", query.locale.as_ref())
            .opt("result_type", query.result_type)
            .opt("count", query.count)
            .opt("until", query.until.as_ref())
            .opt("since_id", query.since_id)
            .opt("max_id", query.max_id)
            .opt("include_entities", query.include_entities);
        self.binding.invoke("tweets", args).await
    }
}
