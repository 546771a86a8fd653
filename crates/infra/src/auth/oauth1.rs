//! OAuth 1.0a request signing (HMAC-SHA1)
//!
//! The signature base string covers the verb, the base URL and every query
//! and `application/x-www-form-urlencoded` body parameter. Multipart bodies
//! are not part of the signature.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;
use twitkit_core::ApiRequest;
use twitkit_domain::{AuthConfig, Result, TwitterError};

use super::RequestSigner;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// Signs requests on behalf of a user with the app's consumer credentials
#[derive(Clone)]
pub struct OAuth1Signer {
    consumer_key: String,
    consumer_secret: String,
    token: String,
    token_secret: String,
}

impl OAuth1Signer {
    pub fn new(
        auth_config: &AuthConfig,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: auth_config.consumer_key.clone(),
            consumer_secret: auth_config.consumer_secret.clone(),
            token: token.into(),
            token_secret: token_secret.into(),
        }
    }

    pub(crate) fn sign_with(
        &self,
        request: &mut ApiRequest,
        nonce: &str,
        timestamp: i64,
    ) -> Result<()> {
        let timestamp = timestamp.to_string();
        let oauth_params = [
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.token.as_str()),
            ("oauth_version", OAUTH_VERSION),
        ];

        let base = signature_base_string(request, &oauth_params);
        let key = format!("{}&{}", encode(&self.consumer_secret), encode(&self.token_secret));
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| TwitterError::Configuration(format!("invalid signing key: {}", e)))?;
        mac.update(base.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        let mut fields: Vec<String> = oauth_params
            .iter()
            .map(|(name, value)| format!("{}=\"{}\"", name, encode(value)))
            .collect();
        fields.push(format!("oauth_signature=\"{}\"", encode(&signature)));
        fields.sort();

        request.set_header("authorization", format!("OAuth {}", fields.join(", ")));
        Ok(())
    }
}

impl RequestSigner for OAuth1Signer {
    fn sign(&self, request: &mut ApiRequest) -> Result<()> {
        self.sign_with(request, &nonce(), Utc::now().timestamp())
    }
}

impl fmt::Debug for OAuth1Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth1Signer")
            .field("consumer_key", &self.consumer_key)
            .finish_non_exhaustive()
    }
}

fn nonce() -> String {
    rand::thread_rng().sample_iter(&Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}

/// RFC 3986 percent-encoding (unreserved characters pass through)
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn signature_base_string(request: &ApiRequest, oauth_params: &[(&str, &str)]) -> String {
    let mut params: Vec<(String, String)> = request
        .query_pairs()
        .iter()
        .chain(request.form_params())
        .map(|(name, value)| (encode(name), encode(value)))
        .chain(oauth_params.iter().map(|(name, value)| (encode(name), encode(value))))
        .collect();
    params.sort();

    let parameter_string = params
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&");

    let url = &request.url;
    let base_url = format!("{}{}", url.origin().ascii_serialization(), url.path());

    format!(
        "{}&{}&{}",
        request.method.as_str(),
        encode(&base_url),
        encode(&parameter_string)
    )
}

#[cfg(test)]
mod tests {
    use twitkit_core::{HttpMethod, MultipartField, RequestBody};
    use url::Url;

    use super::*;

    // Worked example from Twitter's "Creating a signature" guide
    const NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
    const TIMESTAMP: i64 = 1318622958;

    fn documented_signer() -> OAuth1Signer {
        OAuth1Signer::new(
            &AuthConfig::new(
                "xvz1evFS4wEEPTGEFPHBog",
                "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            ),
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        )
    }

    fn documented_request() -> ApiRequest {
        let mut request = ApiRequest::new(
            HttpMethod::Post,
            Url::parse("https://api.twitter.com/1.1/statuses/update.json?include_entities=true")
                .unwrap(),
        );
        request.body = RequestBody::Form(vec![(
            "status".into(),
            "Hello Ladies + Gentlemen, a signed OAuth request!".into(),
        )]);
        request
    }

    fn header_field<'a>(header: &'a str, name: &str) -> &'a str {
        let prefix = format!("{}=\"", name);
        let start = header.find(&prefix).unwrap() + prefix.len();
        let end = start + header[start..].find('"').unwrap();
        &header[start..end]
    }

    #[test]
    fn base_string_matches_documented_example() {
        let signer = documented_signer();
        let params = [
            ("oauth_consumer_key", signer.consumer_key.as_str()),
            ("oauth_nonce", NONCE),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", "1318622958"),
            ("oauth_token", signer.token.as_str()),
            ("oauth_version", OAUTH_VERSION),
        ];
        let base = signature_base_string(&documented_request(), &params);
        assert_eq!(
            base,
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
             include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26\
             oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26\
             oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26\
             oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26\
             oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen\
             %252C%2520a%2520signed%2520OAuth%2520request%2521"
        );
    }

    #[test]
    fn signature_matches_documented_example() {
        let mut request = documented_request();
        documented_signer().sign_with(&mut request, NONCE, TIMESTAMP).unwrap();

        let header = request.header("Authorization").unwrap();
        assert!(header.starts_with("OAuth "));
        assert_eq!(header_field(header, "oauth_signature"), "hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D");
        assert_eq!(header_field(header, "oauth_nonce"), NONCE);
        assert_eq!(header_field(header, "oauth_timestamp"), "1318622958");
        assert_eq!(header_field(header, "oauth_version"), "1.0");
    }

    #[test]
    fn multipart_parts_are_not_signed() {
        let signer = documented_signer();
        let url = Url::parse("https://upload.twitter.com/1.1/media/upload.json").unwrap();

        let mut bare = ApiRequest::new(HttpMethod::Post, url.clone());
        signer.sign_with(&mut bare, NONCE, TIMESTAMP).unwrap();

        let mut with_media = ApiRequest::new(HttpMethod::Post, url);
        with_media.body = RequestBody::Multipart(vec![MultipartField::text("media_data", "AAAA")]);
        signer.sign_with(&mut with_media, NONCE, TIMESTAMP).unwrap();

        assert_eq!(bare.header("authorization"), with_media.header("authorization"));
    }

    #[test]
    fn every_signing_is_fresh() {
        let signer = documented_signer();
        let mut first = documented_request();
        let mut second = documented_request();
        signer.sign(&mut first).unwrap();
        signer.sign(&mut second).unwrap();

        let first = first.header("authorization").unwrap();
        let second = second.header("authorization").unwrap();
        assert_ne!(header_field(first, "oauth_nonce"), header_field(second, "oauth_nonce"));
        assert_eq!(header_field(first, "oauth_nonce").len(), NONCE_LEN);
    }

    #[test]
    fn debug_hides_secrets() {
        let rendered = format!("{:?}", documented_signer());
        assert!(rendered.contains("xvz1evFS4wEEPTGEFPHBog"));
        assert!(!rendered.contains("kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw"));
        assert!(!rendered.contains("LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE"));
    }
}
