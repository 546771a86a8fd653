//! `statuses/*` endpoints

use twitkit_domain::{Result, Tweet, TwitterError};

use super::{TimelineQuery, UserRef};
use crate::binding::{CallArgs, ServiceBinding};
use crate::descriptor::{EndpointSpec, ParamSpec, ServiceDescriptor};
use crate::factory::Service;

/// Upper bound of ids accepted by `statuses/lookup`
pub const MAX_LOOKUP_IDS: usize = 100;

static DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: "statuses",
    endpoints: &[
        EndpointSpec::get(
            "show",
            "/1.1/statuses/show.json",
            &[
                ParamSpec::required_query("id"),
                ParamSpec::query("trim_user"),
                ParamSpec::query("include_my_retweet"),
                ParamSpec::query("include_entities"),
            ],
        ),
        EndpointSpec::get(
            "lookup",
            "/1.1/statuses/lookup.json",
            &[
                ParamSpec::required_query("id"),
                ParamSpec::query("include_entities"),
                ParamSpec::query("trim_user"),
                ParamSpec::query("map"),
            ],
        ),
        EndpointSpec::get(
            "home_timeline",
            "/1.1/statuses/home_timeline.json",
            &[
                ParamSpec::query("count"),
                ParamSpec::query("since_id"),
                ParamSpec::query("max_id"),
                ParamSpec::query("include_entities"),
            ],
        ),
        EndpointSpec::get(
            "user_timeline",
            "/1.1/statuses/user_timeline.json",
            &[
                ParamSpec::query("user_id"),
                ParamSpec::query("screen_name"),
                ParamSpec::query("count"),
                ParamSpec::query("since_id"),
                ParamSpec::query("max_id"),
                ParamSpec::query("include_entities"),
                ParamSpec::query("trim_user"),
                ParamSpec::query("exclude_replies"),
                ParamSpec::query("include_rts"),
            ],
        ),
        EndpointSpec::get(
            "mentions_timeline",
            "/1.1/statuses/mentions_timeline.json",
            &[
                ParamSpec::query("count"),
                ParamSpec::query("since_id"),
                ParamSpec::query("max_id"),
                ParamSpec::query("include_entities"),
            ],
        ),
        EndpointSpec::post(
            "update",
            "/1.1/statuses/update.json",
            &[
                ParamSpec::required_form("status"),
                ParamSpec::form("in_reply_to_status_id"),
                ParamSpec::form("possibly_sensitive"),
                ParamSpec::form("lat"),
                ParamSpec::form("long"),
                ParamSpec::form("place_id"),
                ParamSpec::form("display_coordinates"),
                ParamSpec::form("trim_user"),
                ParamSpec::form("media_ids"),
                ParamSpec::form("attachment_url"),
                ParamSpec::form("auto_populate_reply_metadata"),
                ParamSpec::form("exclude_reply_user_ids"),
            ],
        ),
        EndpointSpec::post(
            "retweet",
            "/1.1/statuses/retweet/{id}.json",
            &[ParamSpec::path("id"), ParamSpec::form("trim_user")],
        ),
        EndpointSpec::post(
            "unretweet",
            "/1.1/statuses/unretweet/{id}.json",
            &[ParamSpec::path("id"), ParamSpec::form("trim_user")],
        ),
        EndpointSpec::post(
            "destroy",
            "/1.1/statuses/destroy/{id}.json",
            &[ParamSpec::path("id"), ParamSpec::form("trim_user")],
        ),
    ],
};

/// Options for [`StatusesService::lookup`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLookup {
    pub ids: Vec<i64>,
    pub include_entities: Option<bool>,
    pub trim_user: Option<bool>,
}

impl StatusLookup {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self { ids: ids.into_iter().collect(), ..Self::default() }
    }
}

/// Options for [`StatusesService::user_timeline`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserTimeline {
    /// Authenticating user when `None`
    pub user: Option<UserRef>,
    pub query: TimelineQuery,
    pub trim_user: Option<bool>,
    pub exclude_replies: Option<bool>,
    pub include_rts: Option<bool>,
}

/// A new tweet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusUpdate {
    pub status: String,
    pub in_reply_to_status_id: Option<i64>,
    pub possibly_sensitive: Option<bool>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub place_id: Option<String>,
    pub display_coordinates: Option<bool>,
    pub trim_user: Option<bool>,
    /// Ids returned by the media upload endpoint, at most four
    pub media_ids: Vec<i64>,
    pub attachment_url: Option<String>,
    pub auto_populate_reply_metadata: Option<bool>,
    pub exclude_reply_user_ids: Vec<i64>,
}

impl StatusUpdate {
    pub fn new(status: impl Into<String>) -> Self {
        Self { status: status.into(), ..Self::default() }
    }

    pub fn in_reply_to(mut self, id: i64) -> Self {
        self.in_reply_to_status_id = Some(id);
        self
    }

    pub fn with_media(mut self, media_ids: impl IntoIterator<Item = i64>) -> Self {
        self.media_ids.extend(media_ids);
        self
    }

    fn to_args(&self) -> CallArgs {
        CallArgs::new()
            .arg("status", &self.status)
            .opt("in_reply_to_status_id", self.in_reply_to_status_id)
            .opt("possibly_sensitive", self.possibly_sensitive)
            .opt("lat", self.lat)
            .opt("long", self.long)
            .opt("place_id", self.place_id.as_ref())
            .opt("display_coordinates", self.display_coordinates)
            .opt("trim_user", self.trim_user)
            .opt("media_ids", join_ids(&self.media_ids))
            .opt("attachment_url", self.attachment_url.as_ref())
            .opt("auto_populate_reply_metadata", self.auto_populate_reply_metadata)
            .opt("exclude_reply_user_ids", join_ids(&self.exclude_reply_user_ids))
    }
}

fn join_ids(ids: &[i64]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    Some(ids.iter().map(i64::to_string).collect::<Vec<_>>().join(","))
}

#[derive(Debug)]
pub struct StatusesService {
    binding: ServiceBinding,
}

impl Service for StatusesService {
    fn descriptor() -> &'static ServiceDescriptor {
        &DESCRIPTOR
    }

    fn from_binding(binding: ServiceBinding) -> Self {
        Self { binding }
    }
}

impl StatusesService {
    pub async fn show(&self, id: i64, include_entities: Option<bool>) -> Result<Tweet> {
        let args = CallArgs::new().arg("id", id).opt("include_entities", include_entities);
        self.binding.invoke("show", args).await
    }

    /// Fetch up to [`MAX_LOOKUP_IDS`] tweets in one call.
    ///
    /// # Errors
    /// `InvalidArgument` for an empty or oversized id list.
    pub async fn lookup(&self, lookup: &StatusLookup) -> Result<Vec<Tweet>> {
        if lookup.ids.is_empty() || lookup.ids.len() > MAX_LOOKUP_IDS {
            return Err(TwitterError::InvalidArgument(format!(
                "lookup takes between 1 and {} ids, got {}",
                MAX_LOOKUP_IDS,
                lookup.ids.len()
            )));
        }
        let args = CallArgs::new()
            .opt("id", join_ids(&lookup.ids))
            .opt("include_entities", lookup.include_entities)
            .opt("trim_user", lookup.trim_user);
        self.binding.invoke("lookup", args).await
    }

    pub async fn home_timeline(&self, query: &TimelineQuery) -> Result<Vec<Tweet>> {
        self.binding.invoke("home_timeline", query.apply(CallArgs::new())).await
    }

    pub async fn user_timeline(&self, timeline: &UserTimeline) -> Result<Vec<Tweet>> {
        let mut args = timeline
            .query
            .apply(CallArgs::new())
            .opt("trim_user", timeline.trim_user)
            .opt("exclude_replies", timeline.exclude_replies)
            .opt("include_rts", timeline.include_rts);
        if let Some(user) = &timeline.user {
            args = user.apply(args, "user_id", "screen_name");
        }
        self.binding.invoke("user_timeline", args).await
    }

    pub async fn mentions_timeline(&self, query: &TimelineQuery) -> Result<Vec<Tweet>> {
        self.binding.invoke("mentions_timeline", query.apply(CallArgs::new())).await
    }

    /// Post a tweet.
    ///
    /// # Errors
    /// `InvalidArgument` if the text is blank and no media is attached.
    pub async fn update(&self, update: &StatusUpdate) -> Result<Tweet> {
        if update.status.trim().is_empty() && update.media_ids.is_empty() {
            return Err(TwitterError::InvalidArgument("status text must not be blank".into()));
        }
        self.binding.invoke("update", update.to_args()).await
    }

    pub async fn retweet(&self, id: i64, trim_user: Option<bool>) -> Result<Tweet> {
        let args = CallArgs::new().arg("id", id).opt("trim_user", trim_user);
        self.binding.invoke("retweet", args).await
    }

    pub async fn unretweet(&self, id: i64, trim_user: Option<bool>) -> Result<Tweet> {
        let args = CallArgs::new().arg("id", id).opt("trim_user", trim_user);
        self.binding.invoke("unretweet", args).await
    }

    /// Delete one of the authenticating user's tweets; returns it.
    pub async fn destroy(&self, id: i64, trim_user: Option<bool>) -> Result<Tweet> {
        let args = CallArgs::new().arg("id", id).opt("trim_user", trim_user);
        self.binding.invoke("destroy", args).await
    }
}
