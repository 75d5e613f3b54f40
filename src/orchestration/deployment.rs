//! # IAP Deployment
//!
//! Deploying an IAP means calling `deploy/{activityId}` on the owning
//! Activity Provider of every Activity, with the parameters stored at
//! creation time, and only then flipping the IAP's `is_deployed` flag.
//!
//! ## Known limitation
//!
//! There is no compensation. If the n-th deploy call fails, the calls before
//! it have already taken effect on their providers and are not undone; the
//! IAP stays undeployed and a later attempt deploys those activities again.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::DbService;
use crate::error::{InveniraError, InveniraResult};
use crate::logging::{log_error, log_iap_operation, log_provider_operation};
use crate::models::{CallerIdentity, Iap};
use crate::provider_client::DeployActivityRequest;
use crate::registry::ProviderClientRegistry;

/// Outcome of a successful IAP deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentReport {
    pub iap_uuid: Uuid,
    /// Providers whose client handle was resolved
    pub providers_visited: usize,
    /// Deploy calls that succeeded
    pub activities_deployed: usize,
}

#[derive(Debug, Clone)]
pub struct DeploymentOrchestrator {
    db: Arc<dyn DbService>,
    registry: Arc<ProviderClientRegistry>,
}

impl DeploymentOrchestrator {
    pub fn new(db: Arc<dyn DbService>, registry: Arc<ProviderClientRegistry>) -> Self {
        Self { db, registry }
    }

    /// Deploy one IAP.
    ///
    /// Fails with `NotFound` for an unknown id and with `AlreadyDeployed`
    /// before any remote call when the IAP is already deployed.
    pub async fn deploy_iap(
        &self,
        iap_uuid: Uuid,
        caller: &CallerIdentity,
    ) -> InveniraResult<DeploymentReport> {
        let iap = self.db.get_iap(iap_uuid).await?;
        if iap.is_deployed {
            return Err(InveniraError::AlreadyDeployed(iap_uuid));
        }

        self.deploy_loaded(iap, caller).await
    }

    /// Deploy every IAP that is not deployed yet, one after another.
    /// Stops at the first failure.
    pub async fn deploy_pending_iaps(
        &self,
        caller: &CallerIdentity,
    ) -> InveniraResult<Vec<DeploymentReport>> {
        let pending: Vec<Iap> = self
            .db
            .get_iaps()
            .await?
            .into_iter()
            .filter(|iap| !iap.is_deployed)
            .collect();

        info!(pending = pending.len(), "Deploying pending IAPs");

        let mut reports = Vec::with_capacity(pending.len());
        for iap in pending {
            reports.push(self.deploy_loaded(iap, caller).await?);
        }
        Ok(reports)
    }

    async fn deploy_loaded(
        &self,
        iap: Iap,
        caller: &CallerIdentity,
    ) -> InveniraResult<DeploymentReport> {
        let started = Instant::now();
        let iap_uuid = iap.iap_uuid;
        let pending = format!("activities={}", iap.activities().count());
        log_iap_operation(
            "deploy",
            Some(iap_uuid),
            caller.as_str(),
            "started",
            Some(&pending),
        );

        let mut report = DeploymentReport {
            iap_uuid,
            providers_visited: 0,
            activities_deployed: 0,
        };

        for provider in &iap.activity_providers {
            let client = self.registry.client_for(&provider.url)?;
            report.providers_visited += 1;

            for activity in &provider.activities {
                let request = DeployActivityRequest {
                    parameters: activity.parameters.clone(),
                };

                if let Err(e) = client.deploy(activity.activity_uuid, &request).await {
                    let reason = e.to_string();
                    log_provider_operation(
                        "deploy",
                        &provider.url,
                        Some(activity.activity_uuid),
                        "failed",
                        Some(&reason),
                    );
                    log_error(
                        "DeploymentOrchestrator",
                        "deploy_iap",
                        &reason,
                        Some(&format!(
                            "iap_uuid={iap_uuid} already_deployed={}",
                            report.activities_deployed
                        )),
                    );
                    return Err(e.into());
                }

                debug!(
                    iap_uuid = %iap_uuid,
                    activity_uuid = %activity.activity_uuid,
                    provider_url = %provider.url,
                    "Activity deployed"
                );
                report.activities_deployed += 1;
            }
        }

        self.db.deploy_iap(iap_uuid, caller).await?;

        log_iap_operation(
            "deploy",
            Some(iap_uuid),
            caller.as_str(),
            "completed",
            Some(&format!(
                "providers={} activities={} elapsed_ms={}",
                report.providers_visited,
                report.activities_deployed,
                started.elapsed().as_millis()
            )),
        );
        Ok(report)
    }
}
