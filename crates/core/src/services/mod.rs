//! First-party services of the REST API v1.1
//!
//! Each service is a thin typed wrapper around a [`ServiceBinding`]: the
//! descriptor lists the endpoints, the methods translate typed options into
//! [`CallArgs`].

pub mod account;
pub mod collection;
pub mod configuration;
pub mod favorite;
pub mod list;
pub mod media;
pub mod search;
pub mod statuses;

pub use account::{AccountService, VerifyCredentials};
pub use collection::{CollectionQuery, CollectionService};
pub use configuration::ConfigurationService;
pub use favorite::FavoriteService;
pub use list::{ListRef, ListService, ListTimeline};
pub use media::{MediaPayload, MediaService, MediaUpload};
pub use search::{ResultType, SearchQuery, SearchService};
pub use statuses::{StatusLookup, StatusUpdate, StatusesService, UserTimeline};

use crate::binding::CallArgs;

/// Cursoring options shared by the timeline endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineQuery {
    pub count: Option<u32>,
    pub since_id: Option<i64>,
    pub max_id: Option<i64>,
    pub include_entities: Option<bool>,
}

impl TimelineQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn since_id(mut self, id: i64) -> Self {
        self.since_id = Some(id);
        self
    }

    pub fn max_id(mut self, id: i64) -> Self {
        self.max_id = Some(id);
        self
    }

    pub fn include_entities(mut self, include: bool) -> Self {
        self.include_entities = Some(include);
        self
    }

    pub(crate) fn apply(&self, args: CallArgs) -> CallArgs {
        args.opt("count", self.count)
            .opt("since_id", self.since_id)
            .opt("max_id", self.max_id)
            .opt("include_entities", self.include_entities)
    }
}

/// A user addressed by numeric id or by handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    Id(i64),
    ScreenName(String),
}

impl UserRef {
    pub fn screen_name(name: impl Into<String>) -> Self {
        Self::ScreenName(name.into())
    }

    /// Set `id_param` or `name_param` depending on the variant.
    pub(crate) fn apply(
        &self,
        args: CallArgs,
        id_param: &'static str,
        name_param: &'static str,
    ) -> CallArgs {
        match self {
            Self::Id(id) => args.arg(id_param, id),
            Self::ScreenName(name) => args.arg(name_param, name),
        }
    }
}

impl From<i64> for UserRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for UserRef {
    fn from(name: &str) -> Self {
        Self::ScreenName(name.to_string())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use twitkit_domain::{ApiEndpoint, Result};

    use crate::codec::JsonCodec;
    use crate::factory::{RemoteCallFactory, Service};
    use crate::transport::{ApiRequest, ApiResponse, HttpTransport};

    /// Answers with a canned body and keeps every request
    pub struct Recorder {
        body: String,
        pub requests: Mutex<Vec<ApiRequest>>,
    }

    impl Recorder {
        pub fn last(&self) -> ApiRequest {
            self.requests.lock().unwrap().last().cloned().expect("no request sent")
        }
    }

    #[async_trait]
    impl HttpTransport for Recorder {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(ApiResponse::new(200, self.body.clone()))
        }
    }

    pub fn bind<S: Service>(body: &str) -> (S, Arc<Recorder>) {
        let recorder =
            Arc::new(Recorder { body: body.to_string(), requests: Mutex::new(Vec::new()) });
        let factory =
            RemoteCallFactory::new(recorder.clone(), JsonCodec::new(), &ApiEndpoint::default())
                .unwrap();
        (factory.create::<S>().unwrap(), recorder)
    }

    pub fn query(request: &ApiRequest) -> Vec<(String, String)> {
        request.query_pairs()
    }

    pub fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }
}
