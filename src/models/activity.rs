use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::audit::AuditStamp;

/// A configured instance of something an Activity Provider offers.
///
/// `parameters` were checked against the provider's contract when the
/// Activity was created and are never re-validated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub activity_uuid: Uuid,
    pub activity_provider_uuid: Uuid,
    pub name: String,
    pub description: String,
    pub parameters: Map<String, Value>,
    #[serde(flatten)]
    pub audit: AuditStamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateActivity {
    pub name: String,
    pub description: String,
    pub activity_provider_uuid: Uuid,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl CreateActivity {
    /// Two activities of one provider may not share a name or a description
    pub fn collides_with(&self, existing: &Activity) -> bool {
        existing.name == self.name || existing.description == self.description
    }
}
