//! # Activity Provider Client
//!
//! Typed access to the four operations every Activity Provider exposes:
//!
//! | Operation | Request | Response |
//! |---|---|---|
//! | config interface | `GET config-interface` | `{ interfaceUrl }` |
//! | config parameters | `GET config-parameters` | `[{ name, type? }]` |
//! | analytics contract | `GET analytics-contract` | `{ qualAnalytics?, quantAnalytics? }` |
//! | deploy | `POST deploy/{activityId}` with `{ parameters }` | empty |
//!
//! [`ActivityProviderApi`] is the seam used by the rest of the crate; the
//! reqwest implementation lives in [`http_client`] and is produced by a
//! [`ProviderClientFactory`].

pub mod factory;
pub mod http_client;
pub mod types;

use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;
use uuid::Uuid;

use crate::error::InveniraError;

pub use factory::{HttpClientFactory, ProviderClientFactory};
pub use http_client::HttpActivityProviderClient;
pub use types::{
    AnalyticsContract, AnalyticsMetric, ConfigInterface, ConfigParameter, DeployActivityRequest,
};

pub type ProviderClientResult<T> = Result<T, ProviderClientError>;

#[derive(Debug, Error)]
pub enum ProviderClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid Activity Provider URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response from {operation}: {reason}")]
    InvalidResponse { operation: String, reason: String },

    #[error("Activity Provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderClientError {
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_url(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// Every failure talking to a provider surfaces as `ProviderUnreachable`
impl From<ProviderClientError> for InveniraError {
    fn from(error: ProviderClientError) -> Self {
        InveniraError::provider_unreachable(error)
    }
}

/// Client handle for one Activity Provider base URL.
///
/// Handles are stateless proxies; two handles for the same URL behave
/// identically.
#[async_trait]
pub trait ActivityProviderApi: Send + Sync + Debug {
    /// Base URL this handle was created for, exactly as registered
    fn base_url(&self) -> &str;

    async fn get_config_interface(&self) -> ProviderClientResult<ConfigInterface>;

    async fn get_config_parameters(&self) -> ProviderClientResult<Vec<ConfigParameter>>;

    async fn get_analytics_contract(&self) -> ProviderClientResult<AnalyticsContract>;

    /// Ask the provider to start collecting metrics for one activity
    async fn deploy(
        &self,
        activity_uuid: Uuid,
        request: &DeployActivityRequest,
    ) -> ProviderClientResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_become_provider_unreachable() {
        let error: InveniraError = ProviderClientError::api_error(503, "down for maintenance").into();
        assert_eq!(
            error.to_string(),
            "Unable to contact Activity Provider: HTTP 503: down for maintenance"
        );
        assert!(error.is_client_error());
    }
}
