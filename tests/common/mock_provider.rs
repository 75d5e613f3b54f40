//! Mock Activity Provider for testing
//!
//! Records every call in shared state so tests can assert on call counts
//! and payloads, and can be scripted to fail.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use invenira_core::error::InveniraResult;
use invenira_core::provider_client::{
    ActivityProviderApi, AnalyticsContract, AnalyticsMetric, ConfigInterface, ConfigParameter,
    DeployActivityRequest, ProviderClientError, ProviderClientFactory, ProviderClientResult,
};

/// Mock provider state for tracking calls and simulating behavior
#[derive(Debug, Default, Clone)]
pub struct MockProviderState {
    pub config_interface_calls: usize,
    pub config_parameter_calls: usize,
    pub analytics_contract_calls: usize,
    /// Every deploy call received, including failed ones
    pub deploy_attempts: Vec<Uuid>,
    /// Deploy calls that succeeded, with the parameters sent
    pub deployed: Vec<(Uuid, Map<String, Value>)>,
    /// Every remote call fails while set
    pub unreachable: bool,
    /// 1-based index of the deploy call that fails
    pub fail_deploy_on_call: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct MockActivityProvider {
    base_url: String,
    parameters: Vec<ConfigParameter>,
    contract: AnalyticsContract,
    state: Arc<Mutex<MockProviderState>>,
}

impl MockActivityProvider {
    /// Provider declaring a single string parameter `test`
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
            parameters: vec![ConfigParameter::new("test", Some("string"))],
            contract: AnalyticsContract::default(),
            state: Arc::new(Mutex::new(MockProviderState::default())),
        }
    }

    pub fn with_parameters(mut self, parameters: &[(&str, Option<&str>)]) -> Self {
        self.parameters = parameters
            .iter()
            .map(|(name, t)| ConfigParameter::new(*name, *t))
            .collect();
        self
    }

    pub fn with_contract(
        mut self,
        qual: Option<&[(&str, Option<&str>)]>,
        quant: Option<&[(&str, Option<&str>)]>,
    ) -> Self {
        let metrics = |list: &[(&str, Option<&str>)]| {
            list.iter()
                .map(|(name, t)| AnalyticsMetric::new(*name, *t))
                .collect::<Vec<_>>()
        };
        self.contract = AnalyticsContract {
            qual_analytics: qual.map(metrics),
            quant_analytics: quant.map(metrics),
        };
        self
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.lock().unwrap().unreachable = unreachable;
    }

    pub fn fail_deploy_on_call(&self, call: usize) {
        self.state.lock().unwrap().fail_deploy_on_call = Some(call);
    }

    /// Get the current state for assertions
    pub fn get_state(&self) -> MockProviderState {
        self.state.lock().unwrap().clone()
    }

    fn handle_for(&self, base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..self.clone()
        }
    }

    fn check_reachable(state: &MockProviderState) -> ProviderClientResult<()> {
        if state.unreachable {
            return Err(ProviderClientError::Unavailable(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ActivityProviderApi for MockActivityProvider {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_config_interface(&self) -> ProviderClientResult<ConfigInterface> {
        let mut state = self.state.lock().unwrap();
        state.config_interface_calls += 1;
        Self::check_reachable(&state)?;
        Ok(ConfigInterface {
            url: format!("{}/configure", self.base_url),
        })
    }

    async fn get_config_parameters(&self) -> ProviderClientResult<Vec<ConfigParameter>> {
        let mut state = self.state.lock().unwrap();
        state.config_parameter_calls += 1;
        Self::check_reachable(&state)?;
        Ok(self.parameters.clone())
    }

    async fn get_analytics_contract(&self) -> ProviderClientResult<AnalyticsContract> {
        let mut state = self.state.lock().unwrap();
        state.analytics_contract_calls += 1;
        Self::check_reachable(&state)?;
        Ok(self.contract.clone())
    }

    async fn deploy(
        &self,
        activity_uuid: Uuid,
        request: &DeployActivityRequest,
    ) -> ProviderClientResult<()> {
        let mut state = self.state.lock().unwrap();
        state.deploy_attempts.push(activity_uuid);
        Self::check_reachable(&state)?;

        if state.fail_deploy_on_call == Some(state.deploy_attempts.len()) {
            return Err(ProviderClientError::api_error(500, "deploy rejected"));
        }

        state
            .deployed
            .push((activity_uuid, request.parameters.clone()));
        Ok(())
    }
}

/// Factory handing out registered mocks; unknown URLs are unreachable
#[derive(Debug, Default)]
pub struct MockClientFactory {
    providers: Mutex<HashMap<String, MockActivityProvider>>,
    created: AtomicUsize,
}

impl MockClientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, url: &str, provider: MockActivityProvider) {
        self.providers
            .lock()
            .unwrap()
            .insert(url.to_string(), provider);
    }

    /// Number of handles constructed so far
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl ProviderClientFactory for MockClientFactory {
    fn create(&self, base_url: &str) -> InveniraResult<Arc<dyn ActivityProviderApi>> {
        self.created.fetch_add(1, Ordering::SeqCst);

        let providers = self.providers.lock().unwrap();
        match providers.get(base_url) {
            Some(provider) => Ok(Arc::new(provider.handle_for(base_url))),
            None => {
                let unreachable = MockActivityProvider::new().handle_for(base_url);
                unreachable.set_unreachable(true);
                Ok(Arc::new(unreachable))
            }
        }
    }
}
