//! Available-metrics aggregation for an IAP.

use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;
use uuid::Uuid;

use crate::database::DbService;
use crate::error::InveniraResult;
use crate::logging::log_provider_operation;
use crate::models::{MetricDescriptor, DEFAULT_METRIC_TYPE};
use crate::registry::ProviderClientRegistry;

/// ECMAScript `\s`: Unicode `Zs`, the ASCII controls, line/paragraph
/// separators and BOM. Unlike Rust's `\s`, NEL (U+0085) is not included.
static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+",
    )
    .unwrap()
});
static NON_IDENTIFIER_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());

/// Turn an Activity name into a metric namespace: whitespace runs become a
/// single `_`, then everything outside `[A-Za-z0-9_]` is dropped.
pub fn sanitize_metric_prefix(name: &str) -> String {
    let underscored = WHITESPACE_RUNS.replace_all(name, "_");
    NON_IDENTIFIER_CHARS.replace_all(&underscored, "").into_owned()
}

#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    db: Arc<dyn DbService>,
    registry: Arc<ProviderClientRegistry>,
}

impl MetricsAggregator {
    pub fn new(db: Arc<dyn DbService>, registry: Arc<ProviderClientRegistry>) -> Self {
        Self { db, registry }
    }

    /// Every metric the IAP's activities expose, in traversal order
    /// (provider, activity, qualitative then quantitative).
    ///
    /// The analytics contract is fetched once per Activity, so a provider
    /// owning three activities is asked three times.
    pub async fn available_metrics(&self, iap_uuid: Uuid) -> InveniraResult<Vec<MetricDescriptor>> {
        let iap = self.db.get_iap(iap_uuid).await?;
        let mut metrics = Vec::new();

        for provider in &iap.activity_providers {
            let client = self.registry.client_for(&provider.url)?;

            for activity in &provider.activities {
                let contract = match client.get_analytics_contract().await {
                    Ok(contract) => contract,
                    Err(e) => {
                        let reason = e.to_string();
                        log_provider_operation(
                            "get_analytics_contract",
                            &provider.url,
                            Some(activity.activity_uuid),
                            "failed",
                            Some(&reason),
                        );
                        return Err(e.into());
                    }
                };

                let prefix = sanitize_metric_prefix(&activity.name);
                metrics.extend(contract.metrics().map(|metric| MetricDescriptor {
                    name: format!("{}.{}", prefix, metric.name),
                    description: String::new(),
                    metric_type: metric
                        .metric_type
                        .clone()
                        .filter(|t| !t.is_empty())
                        .unwrap_or_else(|| DEFAULT_METRIC_TYPE.to_string()),
                }));
            }
        }

        debug!(iap_uuid = %iap_uuid, count = metrics.len(), "Aggregated available metrics");
        Ok(metrics)
    }
}
