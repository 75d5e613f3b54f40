//! Input builders with sensible defaults

use serde_json::{Map, Value};
use uuid::Uuid;

use invenira_core::models::{CreateActivity, CreateActivityProvider, CreateGoal, CreateIap};

pub fn iap_input(name: &str) -> CreateIap {
    CreateIap {
        name: name.to_string(),
        description: format!("{name} description"),
    }
}

pub fn provider_input(name: &str, url: &str) -> CreateActivityProvider {
    CreateActivityProvider {
        name: name.to_string(),
        description: format!("{name} provider"),
        url: url.to_string(),
    }
}

pub fn activity_input(ap_uuid: Uuid, name: &str, parameters: Value) -> CreateActivity {
    CreateActivity {
        name: name.to_string(),
        description: format!("{name} description"),
        activity_provider_uuid: ap_uuid,
        parameters: params(parameters),
    }
}

pub fn goal_input(name: &str, formula: &str) -> CreateGoal {
    CreateGoal {
        name: name.to_string(),
        description: format!("{name} description"),
        formula: formula.to_string(),
        target_value: 10.0,
    }
}

pub fn params(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}
