use std::sync::Arc;

use crate::config::WebConfig;
use crate::services::IapService;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<WebConfig>,
    pub service: Arc<IapService>,
}

impl AppState {
    pub fn new(config: WebConfig, service: IapService) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
        }
    }
}
