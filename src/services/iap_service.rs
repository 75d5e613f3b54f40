//! # IAP Service
//!
//! Composition root of the orchestration core. Enforces the cross-entity
//! rules before anything is persisted:
//!
//! - a new Activity Provider must answer its `config-parameters` call and
//!   must not share a name or URL with a provider already in the IAP
//! - a new Activity must not share a name or description with an Activity of
//!   the same provider, and its parameters must satisfy the provider's
//!   current contract
//! - a new Goal must not share a name or formula with a Goal of the same IAP
//! - a provider that still owns Activities cannot be removed
//!
//! Deployment and metric aggregation are delegated wholesale.

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::DbService;
use crate::error::{InveniraError, InveniraResult};
use crate::logging::{log_iap_operation, log_provider_operation};
use crate::models::{
    Activity, ActivityProvider, CallerIdentity, CreateActivity, CreateActivityProvider,
    CreateGoal, CreateIap, Goal, Iap, MetricDescriptor,
};
use crate::orchestration::{DeploymentOrchestrator, DeploymentReport, MetricsAggregator};
use crate::provider_client::ConfigInterface;
use crate::registry::ProviderClientRegistry;
use crate::validation::ParameterContractValidator;

#[derive(Debug, Clone)]
pub struct IapService {
    db: Arc<dyn DbService>,
    registry: Arc<ProviderClientRegistry>,
    validator: ParameterContractValidator,
    deployer: DeploymentOrchestrator,
    metrics: MetricsAggregator,
}

fn require_non_empty(field: &str, value: &str) -> InveniraResult<()> {
    if value.trim().is_empty() {
        return Err(InveniraError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl IapService {
    pub fn new(db: Arc<dyn DbService>, registry: Arc<ProviderClientRegistry>) -> Self {
        Self {
            validator: ParameterContractValidator::new(registry.clone()),
            deployer: DeploymentOrchestrator::new(db.clone(), registry.clone()),
            metrics: MetricsAggregator::new(db.clone(), registry.clone()),
            db,
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<ProviderClientRegistry> {
        &self.registry
    }

    // Reads

    pub async fn get_activity_providers(&self) -> InveniraResult<Vec<ActivityProvider>> {
        self.db.get_activity_providers().await
    }

    pub async fn get_activity_provider(&self, ap_uuid: Uuid) -> InveniraResult<ActivityProvider> {
        self.db.get_activity_provider(ap_uuid).await
    }

    pub async fn get_activity_provider_activities(
        &self,
        ap_uuid: Uuid,
    ) -> InveniraResult<Vec<Activity>> {
        self.db.get_activity_provider_activities(ap_uuid).await
    }

    pub async fn get_activities(&self) -> InveniraResult<Vec<Activity>> {
        self.db.get_activities().await
    }

    pub async fn get_activity(&self, activity_uuid: Uuid) -> InveniraResult<Activity> {
        self.db.get_activity(activity_uuid).await
    }

    pub async fn get_iaps(&self) -> InveniraResult<Vec<Iap>> {
        self.db.get_iaps().await
    }

    pub async fn get_iap(&self, iap_uuid: Uuid) -> InveniraResult<Iap> {
        self.db.get_iap(iap_uuid).await
    }

    // Activity Providers

    pub async fn create_activity_provider(
        &self,
        iap_uuid: Uuid,
        input: CreateActivityProvider,
        caller: &CallerIdentity,
    ) -> InveniraResult<ActivityProvider> {
        require_non_empty("Activity Provider name", &input.name)?;
        require_non_empty("Activity Provider url", &input.url)?;

        let iap = self.db.get_iap(iap_uuid).await?;

        // Reachability first: nothing is persisted for a provider that
        // cannot be contacted.
        self.validator.fetch_required_fields(&input.url).await?;

        if iap
            .activity_providers
            .iter()
            .any(|provider| input.collides_with(provider))
        {
            return Err(InveniraError::validation("Activity Provider already exists"));
        }

        let provider = self
            .db
            .create_activity_provider(iap_uuid, input, caller)
            .await?;

        info!(
            iap_uuid = %iap_uuid,
            ap_uuid = %provider.activity_provider_uuid,
            url = %provider.url,
            caller = %caller,
            "Activity Provider created"
        );
        Ok(provider)
    }

    pub async fn remove_activity_provider(
        &self,
        ap_uuid: Uuid,
        caller: &CallerIdentity,
    ) -> InveniraResult<()> {
        let provider = self.db.get_activity_provider(ap_uuid).await?;
        if !provider.activities.is_empty() {
            return Err(InveniraError::validation(format!(
                "Activity Provider with id {ap_uuid} contains Activities"
            )));
        }

        self.db.remove_activity_provider(ap_uuid, caller).await?;
        info!(ap_uuid = %ap_uuid, caller = %caller, "Activity Provider removed");
        Ok(())
    }

    pub async fn get_configuration_interface_url(
        &self,
        ap_uuid: Uuid,
    ) -> InveniraResult<ConfigInterface> {
        let provider = self.db.get_activity_provider(ap_uuid).await?;
        let client = self.registry.client_for(&provider.url)?;

        match client.get_config_interface().await {
            Ok(interface) => {
                log_provider_operation("get_config_interface", &provider.url, None, "ok", None);
                Ok(interface)
            }
            Err(e) => {
                let reason = e.to_string();
                log_provider_operation(
                    "get_config_interface",
                    &provider.url,
                    None,
                    "failed",
                    Some(&reason),
                );
                Err(e.into())
            }
        }
    }

    /// Names of the configuration parameters the provider declares
    pub async fn get_configuration_parameters(&self, ap_uuid: Uuid) -> InveniraResult<Vec<String>> {
        let provider = self.db.get_activity_provider(ap_uuid).await?;
        self.validator.fetch_required_fields(&provider.url).await
    }

    /// Fields every Activity of this provider must supply
    pub async fn get_activity_provider_required_fields(
        &self,
        ap_uuid: Uuid,
    ) -> InveniraResult<Vec<String>> {
        let provider = self.db.get_activity_provider(ap_uuid).await?;
        self.validator.fetch_required_fields(&provider.url).await
    }

    // Activities

    pub async fn create_activity(
        &self,
        iap_uuid: Uuid,
        input: CreateActivity,
        caller: &CallerIdentity,
    ) -> InveniraResult<Activity> {
        require_non_empty("Activity name", &input.name)?;

        self.db.get_iap(iap_uuid).await?;
        let provider = self
            .db
            .get_activity_provider(input.activity_provider_uuid)
            .await?;

        if provider
            .activities
            .iter()
            .any(|activity| input.collides_with(activity))
        {
            return Err(InveniraError::validation("Activity already exists"));
        }

        {
            let schema = self.validator.build_schema(&provider.url).await?;
            self.validator.validate(&schema, &input.parameters)?;
        }
        debug!(
            ap_uuid = %provider.activity_provider_uuid,
            name = %input.name,
            "Activity parameters satisfy provider contract"
        );

        let activity = self.db.create_activity(iap_uuid, input, caller).await?;
        info!(
            iap_uuid = %iap_uuid,
            activity_uuid = %activity.activity_uuid,
            caller = %caller,
            "Activity created"
        );
        Ok(activity)
    }

    pub async fn remove_activity(
        &self,
        activity_uuid: Uuid,
        caller: &CallerIdentity,
    ) -> InveniraResult<()> {
        self.db.remove_activity(activity_uuid, caller).await
    }

    // Goals

    pub async fn create_goal(
        &self,
        iap_uuid: Uuid,
        input: CreateGoal,
        caller: &CallerIdentity,
    ) -> InveniraResult<Goal> {
        require_non_empty("Goal name", &input.name)?;

        let iap = self.db.get_iap(iap_uuid).await?;
        if iap.goals.iter().any(|goal| input.collides_with(goal)) {
            return Err(InveniraError::validation("Goal already exists"));
        }

        self.db.create_goal(iap_uuid, input, caller).await
    }

    pub async fn remove_goal(&self, goal_uuid: Uuid, caller: &CallerIdentity) -> InveniraResult<()> {
        self.db.remove_goal(goal_uuid, caller).await
    }

    // IAPs

    pub async fn create_iap(&self, input: CreateIap, caller: &CallerIdentity) -> InveniraResult<Iap> {
        require_non_empty("IAP name", &input.name)?;

        let iap = self.db.create_iap(input, caller).await?;
        log_iap_operation("create", Some(iap.iap_uuid), caller.as_str(), "completed", None);
        Ok(iap)
    }

    /// Removes the IAP along with its Goals and Activities; its providers
    /// survive.
    pub async fn remove_iap(&self, iap_uuid: Uuid, caller: &CallerIdentity) -> InveniraResult<()> {
        self.db.remove_iap(iap_uuid, caller).await?;
        log_iap_operation("remove", Some(iap_uuid), caller.as_str(), "completed", None);
        Ok(())
    }

    pub async fn deploy_iap(
        &self,
        iap_uuid: Uuid,
        caller: &CallerIdentity,
    ) -> InveniraResult<DeploymentReport> {
        self.deployer.deploy_iap(iap_uuid, caller).await
    }

    pub async fn deploy_pending_iaps(
        &self,
        caller: &CallerIdentity,
    ) -> InveniraResult<Vec<DeploymentReport>> {
        self.deployer.deploy_pending_iaps(caller).await
    }

    pub async fn get_iap_available_metrics(
        &self,
        iap_uuid: Uuid,
    ) -> InveniraResult<Vec<MetricDescriptor>> {
        self.metrics.available_metrics(iap_uuid).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("IAP name", "Plan").is_ok());
        assert_eq!(
            require_non_empty("IAP name", "  ").unwrap_err(),
            InveniraError::validation("IAP name cannot be empty")
        );
    }
}
