//! Shared test fixtures: a scriptable Activity Provider, a counting client
//! factory and input builders.

#![allow(dead_code)]

pub mod builders;
pub mod mock_provider;

pub use builders::*;
pub use mock_provider::*;

use std::sync::Arc;

use invenira_core::database::InMemoryDbService;
use invenira_core::models::CallerIdentity;
use invenira_core::registry::ProviderClientRegistry;
use invenira_core::services::IapService;

/// Service wired to an in-memory store and mock providers
pub struct TestHarness {
    pub service: IapService,
    pub db: Arc<InMemoryDbService>,
    pub factory: Arc<MockClientFactory>,
    pub registry: Arc<ProviderClientRegistry>,
    pub caller: CallerIdentity,
}

impl TestHarness {
    pub fn new() -> Self {
        let db = Arc::new(InMemoryDbService::new());
        let factory = Arc::new(MockClientFactory::new());
        let registry = Arc::new(ProviderClientRegistry::new(factory.clone()));
        let service = IapService::new(db.clone(), registry.clone());

        Self {
            service,
            db,
            factory,
            registry,
            caller: CallerIdentity::new("tester@example.com"),
        }
    }

    /// Register a mock provider reachable at `url`
    pub fn provider(&self, url: &str, mock: MockActivityProvider) -> MockActivityProvider {
        self.factory.register(url, mock.clone());
        mock
    }
}
