//! End-to-end tests for the client façade against a mock Twitter API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use twitkit_core::{
    FavoriteService, MediaPayload, MediaUpload, SearchQuery, StatusUpdate, VerifyCredentials,
};
use twitkit_domain::{
    ApiEndpoint, AuthConfig, AuthToken, Session, TlsConfig, TransportConfig, TwitterError,
};
use twitkit_infra::auth::guest::GUEST_TOKEN_HEADER;
use twitkit_infra::TwitterApiClient;
use wiremock::matchers::{
    body_string_contains, header, header_exists, header_regex, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Talks to the mock server directly, whatever proxy the environment names.
fn direct() -> TransportConfig {
    TransportConfig { system_proxy: false, ..TransportConfig::default() }
}

fn user_client_with(endpoint: ApiEndpoint, transport: TransportConfig) -> TwitterApiClient {
    TwitterApiClient::builder()
        .auth_config(AuthConfig::new("consumer-key", "consumer-secret"))
        .session(Session::user(
            AuthToken::oauth1a("user-token", "user-secret"),
            2244994945,
            "TwitterDev",
        ))
        .endpoint(endpoint)
        .transport_config(transport)
        .build()
        .expect("client should build")
}

fn user_client(server: &MockServer) -> TwitterApiClient {
    user_client_with(ApiEndpoint::single_host(server.uri()), direct())
}

fn oauth_nonce(request: &wiremock::Request) -> String {
    let auth = request.headers.get("authorization").unwrap().to_str().unwrap();
    let start = auth.find("oauth_nonce=\"").unwrap() + "oauth_nonce=\"".len();
    auth[start..].split('"').next().unwrap().to_string()
}

#[tokio::test]
async fn verify_credentials_is_oauth_signed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/account/verify_credentials.json"))
        .and(query_param("skip_status", "true"))
        .and(header_regex("authorization", r#"^OAuth .*oauth_consumer_key="consumer-key""#))
        .and(header_regex("authorization", r#"oauth_token="user-token""#))
        .and(header_regex("authorization", r#"oauth_signature="[^"]+""#))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"id": 2244994945, "id_str": "2244994945", "screen_name": "TwitterDev",
                "entities": null, "withheld_in_countries": null}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = user_client(&server);
    let options = VerifyCredentials { skip_status: Some(true), ..Default::default() };
    let user = client.account().unwrap().verify_credentials(options).await.unwrap();

    assert_eq!(user.id, 2244994945);
    assert_eq!(user.screen_name.as_deref(), Some("TwitterDev"));
}

#[tokio::test]
async fn guest_session_sends_bearer_and_guest_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/search/tweets.json"))
        .and(query_param("q", "rustlang"))
        .and(header("authorization", "Bearer app-bearer"))
        .and(header(GUEST_TOKEN_HEADER, "guest-123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"statuses": null, "search_metadata": {"count": 15}}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = TwitterApiClient::builder()
        .session(Session::guest("app-bearer", "guest-123"))
        .endpoint(ApiEndpoint::single_host(server.uri()))
        .transport_config(direct())
        .build()
        .unwrap();

    let search = client.search().unwrap().tweets(&SearchQuery::new("rustlang")).await.unwrap();
    assert!(search.statuses.is_empty());
}

#[tokio::test]
async fn each_call_carries_a_fresh_signature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/statuses/update.json"))
        .and(header_exists("authorization"))
        .and(body_string_contains("status=hello"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": 1, "text": "hello"}"#))
        .expect(2)
        .mount(&server)
        .await;

    let client = user_client(&server);
    let statuses = client.statuses().unwrap();
    statuses.update(&StatusUpdate::new("hello")).await.unwrap();
    statuses.update(&StatusUpdate::new("hello")).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let nonces: Vec<String> = received.iter().map(oauth_nonce).collect();
    assert_eq!(nonces.len(), 2);
    assert_ne!(nonces[0], nonces[1]);
}

#[tokio::test]
async fn api_errors_surface_code_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/account/verify_credentials.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"errors": [{"code": 89, "message": "Invalid or expired token."}]}"#,
        ))
        .mount(&server)
        .await;

    let client = user_client(&server);
    let error =
        client.account().unwrap().verify_credentials(Default::default()).await.unwrap_err();

    assert_eq!(
        error,
        TwitterError::Api {
            status: 401,
            code: Some(89),
            message: "Invalid or expired token.".into()
        }
    );
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/help/configuration.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"photo_size_limit\": "))
        .mount(&server)
        .await;

    let client = user_client(&server);
    let result = client.configuration().unwrap().configuration().await;
    assert!(matches!(result, Err(TwitterError::Decode(_))));
}

#[tokio::test]
async fn media_upload_goes_to_upload_host() {
    let api = MockServer::start().await;
    let upload = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/media/upload.json"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(header_regex("authorization", "^OAuth "))
        .and(body_string_contains("name=\"media_data\""))
        .and(body_string_contains("AAEC"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"media_id": 710511363345354753, "media_id_string": "710511363345354753"}"#,
        ))
        .expect(1)
        .mount(&upload)
        .await;

    let client =
        user_client_with(ApiEndpoint { base_url: api.uri(), upload_url: upload.uri() }, direct());

    let media = client
        .media()
        .unwrap()
        .upload(MediaUpload::new(MediaPayload::base64_from(&[0, 1, 2])))
        .await
        .unwrap();

    assert_eq!(media.media_id, 710511363345354753);
    assert!(api.received_requests().await.unwrap().is_empty());
}

#[test]
fn concurrent_lookups_share_one_service() {
    const THREADS: usize = 50;
    let client = user_client_with(ApiEndpoint::default(), direct());
    let barrier = Barrier::new(THREADS);

    let services: Vec<Arc<FavoriteService>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    client.favorites().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    let first = client.service::<FavoriteService>().unwrap();
    assert!(services.iter().all(|service| Arc::ptr_eq(service, &first)));
}

#[tokio::test]
async fn retried_attempts_are_signed_afresh() {
    let server = MockServer::start().await;
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    Mock::given(method("GET"))
        .and(path("/1.1/help/configuration.json"))
        .respond_with(move |_: &wiremock::Request| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(503)
            } else {
                ResponseTemplate::new(200).set_body_string("{}")
            }
        })
        .expect(2)
        .mount(&server)
        .await;

    let transport = TransportConfig { max_attempts: 2, ..direct() };
    let client = user_client_with(ApiEndpoint::single_host(server.uri()), transport);
    client.configuration().unwrap().configuration().await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 2);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_ne!(oauth_nonce(&received[0]), oauth_nonce(&received[1]));
}

#[tokio::test]
async fn invalid_session_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = TwitterApiClient::new(
        AuthConfig::new("consumer-key", "consumer-secret"),
        Session::user(AuthToken::oauth1a("", "user-secret"), 1, "jack"),
        ApiEndpoint::single_host(server.uri()),
        TlsConfig::default(),
    );
    assert!(matches!(result, Err(TwitterError::InvalidArgument(_))));
}
