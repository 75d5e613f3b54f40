use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::activity::Activity;
use super::audit::AuditStamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityProvider {
    pub activity_provider_uuid: Uuid,
    pub name: String,
    pub description: String,
    /// Base URL of the remote Activity Provider API
    pub url: String,
    /// Owned activities in creation order
    pub activities: Vec<Activity>,
    #[serde(flatten)]
    pub audit: AuditStamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateActivityProvider {
    pub name: String,
    pub description: String,
    pub url: String,
}

impl CreateActivityProvider {
    pub fn collides_with(&self, existing: &ActivityProvider) -> bool {
        existing.name == self.name || existing.url == self.url
    }
}
