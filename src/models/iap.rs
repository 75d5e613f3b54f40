//! The Inventive Activity Plan aggregate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::activity::Activity;
use super::activity_provider::ActivityProvider;
use super::audit::AuditStamp;
use super::goal::Goal;

/// Aggregate root: providers (each embedding its activities) and goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iap {
    pub iap_uuid: Uuid,
    pub name: String,
    pub description: String,
    pub activity_providers: Vec<ActivityProvider>,
    pub goals: Vec<Goal>,
    /// Flips from false to true exactly once
    pub is_deployed: bool,
    /// Provider id to deploy URL, kept for older clients
    #[serde(default)]
    pub deploy_urls: HashMap<Uuid, String>,
    #[serde(flatten)]
    pub audit: AuditStamp,
}

impl Iap {
    /// Every activity in traversal order (provider order, then activity order)
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.activity_providers
            .iter()
            .flat_map(|provider| provider.activities.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIap {
    pub name: String,
    pub description: String,
}
