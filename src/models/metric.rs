use serde::{Deserialize, Serialize};

/// Type reported when an analytics contract leaves a metric untyped
pub const DEFAULT_METRIC_TYPE: &str = "string";

/// A metric an IAP can report on, namespaced by the Activity exposing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDescriptor {
    /// `<sanitized activity name>.<metric name>`
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub metric_type: String,
}
