//! Wire types of the Activity Provider protocol.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `GET config-interface` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInterfaceResponse {
    pub interface_url: String,
}

/// URL a human opens to configure an activity on the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigInterface {
    pub url: String,
}

impl From<ConfigInterfaceResponse> for ConfigInterface {
    fn from(response: ConfigInterfaceResponse) -> Self {
        Self {
            url: response.interface_url,
        }
    }
}

/// One declared configuration parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigParameter {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
}

impl ConfigParameter {
    pub fn new(name: impl Into<String>, param_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsMetric {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<String>,
}

impl AnalyticsMetric {
    pub fn new(name: impl Into<String>, metric_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            metric_type: metric_type.map(str::to_string),
        }
    }
}

/// `GET analytics-contract` response body; either list may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsContract {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qual_analytics: Option<Vec<AnalyticsMetric>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quant_analytics: Option<Vec<AnalyticsMetric>>,
}

impl AnalyticsContract {
    /// Qualitative metrics followed by quantitative metrics
    pub fn metrics(&self) -> impl Iterator<Item = &AnalyticsMetric> {
        self.qual_analytics
            .iter()
            .flatten()
            .chain(self.quant_analytics.iter().flatten())
    }
}

/// `POST deploy/{activityId}` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployActivityRequest {
    pub parameters: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analytics_contract_tolerates_missing_lists() {
        let contract: AnalyticsContract = serde_json::from_value(json!({})).unwrap();
        assert_eq!(contract.metrics().count(), 0);

        let contract: AnalyticsContract = serde_json::from_value(json!({
            "qualAnalytics": [{"name": "comments"}],
            "quantAnalytics": [{"name": "score", "type": "number"}, {"name": "time", "type": "integer"}]
        }))
        .unwrap();
        let names: Vec<_> = contract.metrics().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["comments", "score", "time"]);
        assert_eq!(contract.qual_analytics.unwrap()[0].metric_type, None);
    }

    #[test]
    fn test_config_interface_wire_name() {
        let response: ConfigInterfaceResponse =
            serde_json::from_value(json!({"interfaceUrl": "http://ap/config"})).unwrap();
        assert_eq!(ConfigInterface::from(response).url, "http://ap/config");
    }
}
