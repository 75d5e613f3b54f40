use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::InveniraResult;
use crate::provider_client::{ActivityProviderApi, ProviderClientFactory};

/// One lazily-built client handle per provider base URL.
///
/// Keys are the exact URL strings handed in; no normalization. Entries are
/// never evicted. Two callers racing on a first-seen URL may both build a
/// handle, but only the first inserted one is kept and returned.
#[derive(Debug)]
pub struct ProviderClientRegistry {
    factory: Arc<dyn ProviderClientFactory>,
    clients: DashMap<String, Arc<dyn ActivityProviderApi>>,
}

impl ProviderClientRegistry {
    pub fn new(factory: Arc<dyn ProviderClientFactory>) -> Self {
        Self {
            factory,
            clients: DashMap::new(),
        }
    }

    /// Cached handle for `url`, building it on first use. Makes no network
    /// call.
    pub fn client_for(&self, url: &str) -> InveniraResult<Arc<dyn ActivityProviderApi>> {
        if let Some(client) = self.clients.get(url) {
            debug!(url = %url, "Returning cached Activity Provider client");
            return Ok(Arc::clone(client.value()));
        }

        let created = self.factory.create(url)?;
        let client = Arc::clone(
            self.clients
                .entry(url.to_string())
                .or_insert(created)
                .value(),
        );

        info!(url = %url, "Created and cached Activity Provider client");
        Ok(client)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn clear(&self) {
        self.clients.clear();
        info!("Activity Provider client cache cleared");
    }

    pub fn cache_stats(&self) -> RegistryCacheStats {
        let mut cached_urls: Vec<String> =
            self.clients.iter().map(|entry| entry.key().clone()).collect();
        cached_urls.sort();

        RegistryCacheStats {
            cached_clients: cached_urls.len(),
            cached_urls,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryCacheStats {
    pub cached_clients: usize,
    pub cached_urls: Vec<String>,
}
