//! `favorites/*` endpoints

use twitkit_domain::{Result, Tweet};

use super::{TimelineQuery, UserRef};
use crate::binding::{CallArgs, ServiceBinding};
use crate::descriptor::{EndpointSpec, ParamSpec, ServiceDescriptor};
use crate::factory::Service;

static DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: "favorites",
    endpoints: &[
        EndpointSpec::get(
            "list",
            "/1.1/favorites/list.json",
            &[
                ParamSpec::query("user_id"),
                ParamSpec::query("screen_name"),
                ParamSpec::query("count"),
                ParamSpec::query("since_id"),
                ParamSpec::query("max_id"),
                ParamSpec::query("include_entities"),
            ],
        ),
        EndpointSpec::post(
            "create",
            "/1.1/favorites/create.json",
            &[ParamSpec::required_form("id"), ParamSpec::form("include_entities")],
        ),
        EndpointSpec::post(
            "destroy",
            "/1.1/favorites/destroy.json",
            &[ParamSpec::required_form("id"), ParamSpec::form("include_entities")],
        ),
    ],
};

#[derive(Debug)]
pub struct FavoriteService {
    binding: ServiceBinding,
}

impl Service for FavoriteService {
    fn descriptor() -> &'static ServiceDescriptor {
        &DESCRIPTOR
    }

    fn from_binding(binding: ServiceBinding) -> Self {
        Self { binding }
    }
}

impl FavoriteService {
    /// Tweets liked by `user`, or by the authenticating user when `None`.
    pub async fn list(&self, user: Option<&UserRef>, query: &TimelineQuery) -> Result<Vec<Tweet>> {
        let mut args = query.apply(CallArgs::new());
        if let Some(user) = user {
            args = user.apply(args, "user_id", "screen_name");
        }
        self.binding.invoke("list", args).await
    }

    /// Like a tweet; returns the liked tweet.
    pub async fn create(&self, id: i64, include_entities: Option<bool>) -> Result<Tweet> {
        let args = CallArgs::new().arg("id", id).opt("include_entities", include_entities);
        self.binding.invoke("create", args).await
    }

    pub async fn destroy(&self, id: i64, include_entities: Option<bool>) -> Result<Tweet> {
        let args = CallArgs::new().arg("id", id).opt("include_entities", include_entities);
        self.binding.invoke("destroy", args).await
    }
}
