use reqwest::Client;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::info;

use super::http_client::HttpActivityProviderClient;
use super::ActivityProviderApi;
use crate::config::ProviderClientConfig;
use crate::error::{InveniraError, InveniraResult};

/// Builds client handles for the registry. Tests substitute their own.
pub trait ProviderClientFactory: Send + Sync + Debug {
    fn create(&self, base_url: &str) -> InveniraResult<Arc<dyn ActivityProviderApi>>;
}

/// Produces [`HttpActivityProviderClient`]s over one shared reqwest pool
#[derive(Debug, Clone)]
pub struct HttpClientFactory {
    client: Client,
}

impl HttpClientFactory {
    pub fn new(config: &ProviderClientConfig) -> InveniraResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                InveniraError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!(
            timeout_ms = config.timeout_ms,
            connect_timeout_ms = config.connect_timeout_ms,
            "Created Activity Provider HTTP client pool"
        );

        Ok(Self { client })
    }
}

impl ProviderClientFactory for HttpClientFactory {
    fn create(&self, base_url: &str) -> InveniraResult<Arc<dyn ActivityProviderApi>> {
        let handle = HttpActivityProviderClient::new(self.client.clone(), base_url)?;
        Ok(Arc::new(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_rejects_malformed_url_as_unreachable() {
        let factory = HttpClientFactory::new(&ProviderClientConfig::default()).unwrap();

        let error = factory.create("::not-a-url::").unwrap_err();
        assert!(matches!(error, InveniraError::ProviderUnreachable(_)));

        let handle = factory.create("http://localhost:9000").unwrap();
        assert_eq!(handle.base_url(), "http://localhost:9000");
    }
}
