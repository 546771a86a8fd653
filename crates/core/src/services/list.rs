//! `lists/statuses`

use twitkit_domain::{Result, Tweet};

use super::{TimelineQuery, UserRef};
use crate::binding::{CallArgs, ServiceBinding};
use crate::descriptor::{EndpointSpec, ParamSpec, ServiceDescriptor};
use crate::factory::Service;

static DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: "lists",
    endpoints: &[EndpointSpec::get(
        "statuses",
        "/1.1/lists/statuses.json",
        &[
            ParamSpec::query("list_id"),
            ParamSpec::query("slug"),
            ParamSpec::query("owner_id"),
            ParamSpec::query("owner_screen_name"),
            ParamSpec::query("count"),
            ParamSpec::query("since_id"),
            ParamSpec::query("max_id"),
            ParamSpec::query("include_entities"),
            ParamSpec::query("include_rts"),
        ],
    )],
};

/// A list is addressed by id, or by slug together with its owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRef {
    Id(i64),
    Slug { slug: String, owner: UserRef },
}

impl ListRef {
    pub fn slug(slug: impl Into<String>, owner: impl Into<UserRef>) -> Self {
        Self::Slug { slug: slug.into(), owner: owner.into() }
    }

    fn apply(&self, args: CallArgs) -> CallArgs {
        match self {
            Self::Id(id) => args.arg("list_id", id),
            Self::Slug { slug, owner } => {
                owner.apply(args.arg("slug", slug), "owner_id", "owner_screen_name")
            }
        }
    }
}

/// Options for [`ListService::statuses`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTimeline {
    pub list: ListRef,
    pub query: TimelineQuery,
    pub include_rts: Option<bool>,
}

impl ListTimeline {
    pub fn new(list: ListRef) -> Self {
        Self { list, query: TimelineQuery::default(), include_rts: None }
    }
}

#[derive(Debug)]
pub struct ListService {
    binding: ServiceBinding,
}

impl Service for ListService {
    fn descriptor() -> &'static ServiceDescriptor {
        &DESCRIPTOR
    }

    fn from_binding(binding: ServiceBinding) -> Self {
        Self { binding }
    }
}

impl ListService {
    /// Timeline of tweets by the members of a list.
    pub async fn statuses(&self, timeline: &ListTimeline) -> Result<Vec<Tweet>> {
        let args = timeline
            .list
            .apply(CallArgs::new())
            .opt("include_rts", timeline.include_rts);
        self.binding.invoke("statuses", timeline.query.apply(args)).await
    }
}
