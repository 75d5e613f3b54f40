//! Property-based tests for naming and client caching invariants

mod common;

use common::*;
use proptest::prelude::*;
use std::sync::Arc;

use invenira_core::orchestration::sanitize_metric_prefix;
use invenira_core::validation::ParameterSchema;
use invenira_core::provider_client::ConfigParameter;

proptest! {
    #[test]
    fn sanitized_prefix_uses_identifier_alphabet(name in ".{0,64}") {
        let prefix = sanitize_metric_prefix(&name);
        prop_assert!(prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }

    #[test]
    fn sanitize_is_idempotent(name in ".{0,64}") {
        let once = sanitize_metric_prefix(&name);
        prop_assert_eq!(sanitize_metric_prefix(&once), once);
    }

    #[test]
    fn identifier_names_pass_through(name in "[A-Za-z0-9_]{1,32}") {
        prop_assert_eq!(sanitize_metric_prefix(&name), name);
    }

    #[test]
    fn schema_requires_each_declared_name_once(
        names in prop::collection::vec("[a-z]{1,8}", 1..12)
    ) {
        let parameters: Vec<ConfigParameter> = names
            .iter()
            .map(|name| ConfigParameter::new(name.as_str(), None))
            .collect();
        let schema = ParameterSchema::from_parameters(&parameters).unwrap();

        let mut expected = names.clone();
        let mut seen = std::collections::HashSet::new();
        expected.retain(|name| seen.insert(name.clone()));
        prop_assert_eq!(schema.fields(), expected.as_slice());
    }

    #[test]
    fn registry_hands_out_one_client_per_url(lookups in 1usize..20) {
        let harness = TestHarness::new();
        harness.provider("http://quiz.example.com", MockActivityProvider::new());

        let first = harness.registry.client_for("http://quiz.example.com").unwrap();
        for _ in 0..lookups {
            let next = harness.registry.client_for("http://quiz.example.com").unwrap();
            prop_assert!(Arc::ptr_eq(&first, &next));
        }
        prop_assert_eq!(harness.factory.created(), 1);
        prop_assert_eq!(harness.registry.len(), 1);
    }
}
