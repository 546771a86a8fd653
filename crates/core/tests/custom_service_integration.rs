//! A caller-defined service wired through the public registry API.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Deserialize;
use twitkit_core::{
    ApiRequest, ApiResponse, CallArgs, EndpointSpec, HttpTransport, JsonCodec, ParamSpec,
    RemoteCallFactory, Service, ServiceBinding, ServiceDescriptor, ServiceRegistry,
};
use twitkit_domain::{ApiEndpoint, Result, TwitterError};

#[derive(Default)]
struct Scripted {
    requests: Mutex<Vec<ApiRequest>>,
}

#[async_trait]
impl HttpTransport for Scripted {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(ApiResponse::new(200, r#"{"ids": [12, 13], "next_cursor": 0}"#))
    }
}

#[derive(Debug, Deserialize)]
struct Ids {
    ids: Vec<i64>,
    next_cursor: i64,
}

static FOLLOWERS: ServiceDescriptor = ServiceDescriptor {
    name: "followers",
    endpoints: &[EndpointSpec::get(
        "ids",
        "/1.1/followers/ids.json",
        &[ParamSpec::required_query("screen_name"), ParamSpec::query("cursor")],
    )],
};

struct FollowersService {
    binding: ServiceBinding,
}

impl Service for FollowersService {
    fn descriptor() -> &'static ServiceDescriptor {
        &FOLLOWERS
    }

    fn from_binding(binding: ServiceBinding) -> Self {
        Self { binding }
    }
}

impl FollowersService {
    async fn ids(&self, screen_name: &str, cursor: Option<i64>) -> Result<Ids> {
        let args = CallArgs::new().arg("screen_name", screen_name).opt("cursor", cursor);
        self.binding.invoke("ids", args).await
    }
}

static UNBALANCED: ServiceDescriptor = ServiceDescriptor {
    name: "broken",
    endpoints: &[EndpointSpec::get("show", "/1.1/things/{id.json", &[ParamSpec::path("id")])],
};

struct BrokenService;

impl Service for BrokenService {
    fn descriptor() -> &'static ServiceDescriptor {
        &UNBALANCED
    }

    fn from_binding(_binding: ServiceBinding) -> Self {
        Self
    }
}

fn registry(transport: Arc<Scripted>) -> ServiceRegistry {
    let factory =
        RemoteCallFactory::new(transport, JsonCodec::new(), &ApiEndpoint::default()).unwrap();
    ServiceRegistry::new(factory)
}

#[tokio::test]
async fn custom_service_round_trip() {
    let transport = Arc::new(Scripted::default());
    let registry = registry(transport.clone());

    let followers = registry.get::<FollowersService>().unwrap();
    let ids = followers.ids("jack", Some(-1)).await.unwrap();
    assert_eq!(ids.ids, vec![12, 13]);
    assert_eq!(ids.next_cursor, 0);

    let requests = transport.requests.lock().unwrap();
    assert_eq!(
        requests[0].url.as_str(),
        "https://api.twitter.com/1.1/followers/ids.json?screen_name=jack&cursor=-1"
    );
    assert!(Arc::ptr_eq(&followers, &registry.get::<FollowersService>().unwrap()));
}

#[tokio::test]
async fn missing_required_argument_is_rejected_before_sending() {
    let transport = Arc::new(Scripted::default());
    let registry = registry(transport.clone());

    let followers = registry.get::<FollowersService>().unwrap();
    let result: Result<Ids> = followers.binding.invoke("ids", CallArgs::new()).await;

    assert!(matches!(result, Err(TwitterError::InvalidArgument(_))));
    assert!(transport.requests.lock().unwrap().is_empty());
}

#[test]
fn malformed_descriptor_is_a_configuration_error() {
    let registry = registry(Arc::new(Scripted::default()));

    let result = registry.get::<BrokenService>();
    assert!(matches!(result, Err(TwitterError::Configuration(_))));
    assert!(!registry.contains::<BrokenService>());
}
