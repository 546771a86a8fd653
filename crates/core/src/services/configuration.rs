//! `help/configuration`

use twitkit_domain::{Configuration, Result};

use crate::binding::{CallArgs, ServiceBinding};
use crate::descriptor::{EndpointSpec, ServiceDescriptor};
use crate::factory::Service;

static DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: "configuration",
    endpoints: &[EndpointSpec::get("configuration", "/1.1/help/configuration.json", &[])],
};

#[derive(Debug)]
pub struct ConfigurationService {
    binding: ServiceBinding,
}

impl Service for ConfigurationService {
    fn descriptor() -> &'static ServiceDescriptor {
        &DESCRIPTOR
    }

    fn from_binding(binding: ServiceBinding) -> Self {
        Self { binding }
    }
}

impl ConfigurationService {
    /// Current limits used by the API (URL lengths, photo sizes, ...).
    pub async fn configuration(&self) -> Result<Configuration> {
        self.binding.invoke("configuration", CallArgs::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::bind;

    #[tokio::test]
    async fn test_configuration() {
        let (service, recorder) = bind::<ConfigurationService>(
            r#"{"short_url_length_https": 23, "photo_sizes": null,
                "non_username_paths": ["about"]}"#,
        );
        let config = service.configuration().await.unwrap();
        assert_eq!(config.short_url_length_https, Some(23));
        assert!(config.photo_sizes.is_empty());
        assert_eq!(config.non_username_paths, vec!["about".to_string()]);
        assert_eq!(recorder.last().url.path(), "/1.1/help/configuration.json");
    }
}
