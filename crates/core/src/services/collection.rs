//! `collections/entries`

use twitkit_domain::{Result, TwitterCollection, TwitterError};

use crate::binding::{CallArgs, ServiceBinding};
use crate::descriptor::{EndpointSpec, ParamSpec, ServiceDescriptor};
use crate::factory::Service;

static DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: "collections",
    endpoints: &[EndpointSpec::get(
        "entries",
        "/1.1/collections/entries.json",
        &[
            ParamSpec::required_query("id"),
            ParamSpec::query("count"),
            ParamSpec::query("max_position"),
            ParamSpec::query("min_position"),
        ],
    )],
};

/// Options for [`CollectionService::entries`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionQuery {
    /// e.g. `custom-539487832448843776`
    pub id: String,
    pub count: Option<u32>,
    pub max_position: Option<i64>,
    pub min_position: Option<i64>,
}

impl CollectionQuery {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }
}

#[derive(Debug)]
pub struct CollectionService {
    binding: ServiceBinding,
}

impl Service for CollectionService {
    fn descriptor() -> &'static ServiceDescriptor {
        &DESCRIPTOR
    }

    fn from_binding(binding: ServiceBinding) -> Self {
        Self { binding }
    }
}

impl CollectionService {
    pub async fn entries(&self, query: &CollectionQuery) -> Result<TwitterCollection> {
        if query.id.trim().is_empty() {
            return Err(TwitterError::InvalidArgument("collection id must not be blank".into()));
        }
        let args = CallArgs::new()
            .arg("id", &query.id)
            .opt("count", query.count)
            .opt("max_position", query.max_position)
            .opt("min_position", query.min_position);
        self.binding.invoke("entries", args).await
    }
}
