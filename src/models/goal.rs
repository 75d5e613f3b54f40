use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::audit::AuditStamp;

/// A measurable target of an IAP. `formula` is stored as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub goal_uuid: Uuid,
    pub name: String,
    pub description: String,
    pub formula: String,
    pub target_value: f64,
    #[serde(flatten)]
    pub audit: AuditStamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGoal {
    pub name: String,
    pub description: String,
    pub formula: String,
    pub target_value: f64,
}

impl CreateGoal {
    pub fn collides_with(&self, existing: &Goal) -> bool {
        existing.name == self.name || existing.formula == self.formula
    }
}
