//! `account/*` endpoints

use twitkit_domain::{Result, User};

use crate::binding::{CallArgs, ServiceBinding};
use crate::descriptor::{EndpointSpec, ParamSpec, ServiceDescriptor};
use crate::factory::Service;

static DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: "account",
    endpoints: &[EndpointSpec::get(
        "verify_credentials",
        "/1.1/account/verify_credentials.json",
        &[
            ParamSpec::query("include_entities"),
            ParamSpec::query("skip_status"),
            ParamSpec::query("include_email"),
        ],
    )],
};

/// Options for [`AccountService::verify_credentials`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyCredentials {
    pub include_entities: Option<bool>,
    pub skip_status: Option<bool>,
    pub include_email: Option<bool>,
}

#[derive(Debug)]
pub struct AccountService {
    binding: ServiceBinding,
}

impl Service for AccountService {
    fn descriptor() -> &'static ServiceDescriptor {
        &DESCRIPTOR
    }

    fn from_binding(binding: ServiceBinding) -> Self {
        Self { binding }
    }
}

impl AccountService {
    /// Profile of the authenticating user; fails with a 401 `Api` error if
    /// the session is not accepted.
    pub async fn verify_credentials(&self, options: VerifyCredentials) -> Result<User> {
        let args = CallArgs::new()
            .opt("include_entities", options.include_entities)
            .opt("skip_status", options.skip_status)
            .opt("include_email", options.include_email);
        self.binding.invoke("verify_credentials", args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{bind, pairs, query};
    use crate::transport::HttpMethod;

    #[tokio::test]
    async fn test_verify_credentials() {
        let (account, recorder) = bind::<AccountService>(
            r#"{"id": 6253282, "screen_name": "twitterapi", "entities": null}"#,
        );

        let user = account
            .verify_credentials(VerifyCredentials { skip_status: Some(true), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(user.id, 6253282);
        assert_eq!(user.screen_name.as_deref(), Some("twitterapi"));

        let request = recorder.last();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url.path(), "/1.1/account/verify_credentials.json");
        assert_eq!(query(&request), pairs(&[("skip_status", "true")]));
    }
}
