//! # Parameter Contract Validation
//!
//! Every Activity Provider declares the configuration parameters an Activity
//! must supply (`GET config-parameters`). Before an Activity is persisted its
//! parameter mapping is checked against a JSON Schema derived from that
//! declaration:
//!
//! - every declared name is a required property
//! - the property type comes from the declared type tag (string when absent)
//! - undeclared properties are rejected
//!
//! The contract is fetched again for every check; only the client handle is
//! cached (see [`ProviderClientRegistry`]).

use jsonschema::{Draft, JSONSchema};
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::error::{InveniraError, InveniraResult};
use crate::logging::log_provider_operation;
use crate::provider_client::ConfigParameter;
use crate::registry::ProviderClientRegistry;

/// Prefix of every contract violation message
pub const VALIDATION_FAILED_PREFIX: &str = "Activity parameter validation failed";

/// Compiled structural validator for one provider's parameter contract
pub struct ParameterSchema {
    fields: Vec<String>,
    schema: Value,
    compiled: JSONSchema,
}

impl std::fmt::Debug for ParameterSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterSchema")
            .field("fields", &self.fields)
            .field("schema", &self.schema)
            .finish()
    }
}

impl ParameterSchema {
    pub fn from_parameters(parameters: &[ConfigParameter]) -> InveniraResult<Self> {
        let mut properties = Map::new();
        let mut fields = Vec::with_capacity(parameters.len());
        let mut seen = HashSet::new();

        for parameter in parameters {
            properties.insert(
                parameter.name.clone(),
                json!({ "type": json_schema_type(parameter.param_type.as_deref()) }),
            );
            if seen.insert(parameter.name.as_str()) {
                fields.push(parameter.name.clone());
            }
        }

        let mut schema = json!({
            "type": "object",
            "properties": properties,
            "additionalProperties": false,
        });
        if !fields.is_empty() {
            schema["required"] = json!(fields);
        }

        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema)
            .map_err(|e| {
                InveniraError::Internal(format!("Invalid parameter contract schema: {e}"))
            })?;

        Ok(Self {
            fields,
            schema,
            compiled,
        })
    }

    /// Declared field names, deduplicated, in contract order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn as_json(&self) -> &Value {
        &self.schema
    }

    /// Every violation as `field: message`, in validator order
    pub fn violations(&self, payload: &Map<String, Value>) -> Vec<String> {
        let instance = Value::Object(payload.clone());

        let violations = match self.compiled.validate(&instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|e| {
                    let message = e.to_string().replace('\n', " ");
                    let path = e.instance_path.to_string();
                    let field = path.trim_start_matches('/');
                    if field.is_empty() {
                        message
                    } else {
                        format!("{field}: {message}")
                    }
                })
                .collect(),
        };
        violations
    }
}

/// JSON Schema type for a declared parameter type tag
fn json_schema_type(param_type: Option<&str>) -> &'static str {
    match param_type.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
        Some("number" | "float" | "double") => "number",
        Some("integer" | "int") => "integer",
        Some("boolean" | "bool") => "boolean",
        Some("object" | "json") => "object",
        Some("array" | "list") => "array",
        _ => "string",
    }
}

/// Fetches provider contracts and checks Activity parameters against them
#[derive(Debug, Clone)]
pub struct ParameterContractValidator {
    registry: Arc<ProviderClientRegistry>,
}

impl ParameterContractValidator {
    pub fn new(registry: Arc<ProviderClientRegistry>) -> Self {
        Self { registry }
    }

    async fn fetch_parameters(&self, provider_url: &str) -> InveniraResult<Vec<ConfigParameter>> {
        let client = self.registry.client_for(provider_url)?;

        match client.get_config_parameters().await {
            Ok(parameters) => {
                log_provider_operation("get_config_parameters", provider_url, None, "ok", None);
                Ok(parameters)
            }
            Err(e) => {
                let reason = e.to_string();
                log_provider_operation(
                    "get_config_parameters",
                    provider_url,
                    None,
                    "failed",
                    Some(&reason),
                );
                Err(e.into())
            }
        }
    }

    /// Names of the parameters the provider declares, in contract order.
    /// Doubles as a reachability probe.
    pub async fn fetch_required_fields(&self, provider_url: &str) -> InveniraResult<Vec<String>> {
        let parameters = self.fetch_parameters(provider_url).await?;
        Ok(parameters.into_iter().map(|p| p.name).collect())
    }

    pub async fn build_schema(&self, provider_url: &str) -> InveniraResult<ParameterSchema> {
        let parameters = self.fetch_parameters(provider_url).await?;
        let schema = ParameterSchema::from_parameters(&parameters)?;

        debug!(
            provider_url = %provider_url,
            fields = ?schema.fields(),
            "Built parameter contract schema"
        );
        Ok(schema)
    }

    /// All violations are reported together, joined with `"; "`.
    pub fn validate(
        &self,
        schema: &ParameterSchema,
        payload: &Map<String, Value>,
    ) -> InveniraResult<()> {
        let violations = schema.violations(payload);
        if violations.is_empty() {
            return Ok(());
        }

        Err(InveniraError::validation(format!(
            "{}: {}",
            VALIDATION_FAILED_PREFIX,
            violations.join("; ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(parameters: &[(&str, Option<&str>)]) -> ParameterSchema {
        let parameters: Vec<ConfigParameter> = parameters
            .iter()
            .map(|(name, t)| ConfigParameter::new(*name, *t))
            .collect();
        ParameterSchema::from_parameters(&parameters).unwrap()
    }

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_type_tags_map_to_schema_types() {
        assert_eq!(json_schema_type(None), "string");
        assert_eq!(json_schema_type(Some("text")), "string");
        assert_eq!(json_schema_type(Some("Number")), "number");
        assert_eq!(json_schema_type(Some("int")), "integer");
        assert_eq!(json_schema_type(Some("bool")), "boolean");
        assert_eq!(json_schema_type(Some("json")), "object");
        assert_eq!(json_schema_type(Some("list")), "array");
        assert_eq!(json_schema_type(Some("something-new")), "string");
    }

    #[test]
    fn test_exact_payload_passes() {
        let schema = schema(&[("test", Some("string")), ("rounds", Some("integer"))]);
        assert!(schema
            .violations(&payload(json!({"test": "value", "rounds": 3})))
            .is_empty());
    }

    #[test]
    fn test_untyped_parameter_must_be_a_string() {
        let schema = schema(&[("title", None)]);
        let violations = schema.violations(&payload(json!({"title": 42})));

        assert_eq!(violations.len(), 1);
        assert!(violations[0].starts_with("title: "));
    }

    #[test]
    fn test_every_violation_is_reported() {
        let schema = schema(&[("test", Some("string")), ("rounds", Some("integer"))]);
        let violations = schema.violations(&payload(json!({"rounds": "three", "extra": true})));

        assert_eq!(violations.len(), 3, "{violations:?}");
        assert!(violations.iter().any(|v| v.contains("\"test\"")));
        assert!(violations.iter().any(|v| v.starts_with("rounds: ")));
        assert!(violations.iter().any(|v| v.contains("extra")));
    }

    #[test]
    fn test_long_declared_string_is_accepted() {
        let schema = schema(&[("title", Some("string")), ("rounds", Some("integer"))]);
        let title = "x".repeat(10_001);
        assert!(schema
            .violations(&payload(json!({"title": title, "rounds": 1})))
            .is_empty());
    }

    #[test]
    fn test_duplicate_declarations_collapse() {
        let schema = schema(&[("test", None), ("test", Some("string"))]);
        assert_eq!(schema.fields(), ["test".to_string()]);
        assert_eq!(schema.as_json()["required"], json!(["test"]));
    }

    #[test]
    fn test_empty_contract_accepts_only_empty_payload() {
        let schema = schema(&[]);
        assert!(schema.violations(&Map::new()).is_empty());
        assert_eq!(schema.violations(&payload(json!({"x": 1}))).len(), 1);
    }
}
