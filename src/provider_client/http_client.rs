//! reqwest implementation of [`ActivityProviderApi`].

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use uuid::Uuid;

use super::types::{
    AnalyticsContract, ConfigInterface, ConfigInterfaceResponse, ConfigParameter,
    DeployActivityRequest,
};
use super::{ActivityProviderApi, ProviderClientError, ProviderClientResult};

/// HTTP client handle for one Activity Provider.
///
/// Endpoint paths are resolved relative to the base URL, so a provider
/// mounted below a path prefix (`http://host/ap/v2`) keeps that prefix.
#[derive(Clone)]
pub struct HttpActivityProviderClient {
    client: Client,
    base_url: String,
    endpoint_root: Url,
}

impl std::fmt::Debug for HttpActivityProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpActivityProviderClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpActivityProviderClient {
    /// Build a handle sharing `client`'s connection pool.
    pub fn new(client: Client, base_url: &str) -> ProviderClientResult<Self> {
        let mut endpoint_root =
            Url::parse(base_url).map_err(|e| ProviderClientError::invalid_url(base_url, e))?;

        if endpoint_root.cannot_be_a_base() {
            return Err(ProviderClientError::invalid_url(
                base_url,
                "URL cannot be used as a base",
            ));
        }
        if !endpoint_root.path().ends_with('/') {
            let path = format!("{}/", endpoint_root.path());
            endpoint_root.set_path(&path);
        }

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            endpoint_root,
        })
    }

    fn endpoint(&self, path: &str) -> ProviderClientResult<Url> {
        self.endpoint_root
            .join(path)
            .map_err(|e| ProviderClientError::invalid_url(&self.base_url, e))
    }

    async fn get_json<T>(&self, path: &str) -> ProviderClientResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(url = %url, "GET Activity Provider endpoint");

        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response, path).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderClientError::InvalidResponse {
                operation: path.to_string(),
                reason: e.to_string(),
            })
    }

    async fn check_status(
        response: reqwest::Response,
        operation: &str,
    ) -> ProviderClientResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!(status = %status, error = %error_text, "Failed Activity Provider operation: {}", operation);

        Err(ProviderClientError::api_error(status.as_u16(), error_text))
    }
}

#[async_trait]
impl ActivityProviderApi for HttpActivityProviderClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_config_interface(&self) -> ProviderClientResult<ConfigInterface> {
        self.get_json::<ConfigInterfaceResponse>("config-interface")
            .await
            .map(ConfigInterface::from)
    }

    async fn get_config_parameters(&self) -> ProviderClientResult<Vec<ConfigParameter>> {
        self.get_json("config-parameters").await
    }

    async fn get_analytics_contract(&self) -> ProviderClientResult<AnalyticsContract> {
        self.get_json("analytics-contract").await
    }

    async fn deploy(
        &self,
        activity_uuid: Uuid,
        request: &DeployActivityRequest,
    ) -> ProviderClientResult<()> {
        let url = self.endpoint(&format!("deploy/{activity_uuid}"))?;
        debug!(url = %url, activity_uuid = %activity_uuid, "POST Activity Provider deploy");

        let response = self.client.post(url).json(request).send().await?;
        Self::check_status(response, "deploy").await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(base_url: &str) -> HttpActivityProviderClient {
        HttpActivityProviderClient::new(Client::new(), base_url).unwrap()
    }

    #[test]
    fn test_endpoints_resolve_below_base_path() {
        let client = handle("http://provider.example.com/ap/v2");
        assert_eq!(
            client.endpoint("config-parameters").unwrap().as_str(),
            "http://provider.example.com/ap/v2/config-parameters"
        );

        let client = handle("http://provider.example.com/");
        assert_eq!(
            client.endpoint("analytics-contract").unwrap().as_str(),
            "http://provider.example.com/analytics-contract"
        );
    }

    #[test]
    fn test_base_url_is_kept_verbatim() {
        let client = handle("http://provider.example.com/ap");
        assert_eq!(client.base_url(), "http://provider.example.com/ap");
    }

    #[test]
    fn test_invalid_urls_are_rejected() {
        assert!(matches!(
            HttpActivityProviderClient::new(Client::new(), "not a url"),
            Err(ProviderClientError::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpActivityProviderClient::new(Client::new(), "mailto:ap@example.com"),
            Err(ProviderClientError::InvalidUrl { .. })
        ));
    }
}
