//! In-process implementation of [`DbService`].
//!
//! Providers, activities and goals live in their own tables and IAPs only
//! hold id lists; the embedded aggregate is assembled on every read. Tables
//! are `IndexMap`s so listings come back in insertion order.

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use super::DbService;
use crate::error::{EntityKind, InveniraError, InveniraResult};
use crate::models::{
    Activity, ActivityProvider, AuditStamp, CallerIdentity, CreateActivity,
    CreateActivityProvider, CreateGoal, CreateIap, Goal, Iap,
};

#[derive(Debug, Clone)]
struct IapRecord {
    name: String,
    description: String,
    provider_ids: Vec<Uuid>,
    goal_ids: Vec<Uuid>,
    is_deployed: bool,
    deploy_urls: HashMap<Uuid, String>,
    audit: AuditStamp,
}

#[derive(Debug, Clone)]
struct ProviderRecord {
    name: String,
    description: String,
    url: String,
    activity_ids: Vec<Uuid>,
    audit: AuditStamp,
}

#[derive(Debug, Default)]
struct Tables {
    iaps: IndexMap<Uuid, IapRecord>,
    providers: IndexMap<Uuid, ProviderRecord>,
    activities: IndexMap<Uuid, Activity>,
    goals: IndexMap<Uuid, Goal>,
}

impl Tables {
    fn provider(&self, ap_uuid: Uuid) -> InveniraResult<ActivityProvider> {
        let record = self
            .providers
            .get(&ap_uuid)
            .ok_or_else(|| InveniraError::not_found(EntityKind::ActivityProvider, ap_uuid))?;

        Ok(ActivityProvider {
            activity_provider_uuid: ap_uuid,
            name: record.name.clone(),
            description: record.description.clone(),
            url: record.url.clone(),
            activities: record
                .activity_ids
                .iter()
                .filter_map(|id| self.activities.get(id).cloned())
                .collect(),
            audit: record.audit.clone(),
        })
    }

    fn iap(&self, iap_uuid: Uuid) -> InveniraResult<Iap> {
        let record = self
            .iaps
            .get(&iap_uuid)
            .ok_or_else(|| InveniraError::not_found(EntityKind::Iap, iap_uuid))?;

        let activity_providers = record
            .provider_ids
            .iter()
            .map(|id| self.provider(*id))
            .collect::<InveniraResult<Vec<_>>>()?;

        Ok(Iap {
            iap_uuid,
            name: record.name.clone(),
            description: record.description.clone(),
            activity_providers,
            goals: record
                .goal_ids
                .iter()
                .filter_map(|id| self.goals.get(id).cloned())
                .collect(),
            is_deployed: record.is_deployed,
            deploy_urls: record.deploy_urls.clone(),
            audit: record.audit.clone(),
        })
    }

    fn touch_iaps_where<F>(&mut self, caller: &CallerIdentity, mut predicate: F)
    where
        F: FnMut(&IapRecord) -> bool,
    {
        for record in self.iaps.values_mut() {
            if predicate(record) {
                record.audit.touch(caller);
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDbService {
    tables: RwLock<Tables>,
}

impl InMemoryDbService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DbService for InMemoryDbService {
    async fn get_activity_providers(&self) -> InveniraResult<Vec<ActivityProvider>> {
        let tables = self.tables.read();
        tables
            .providers
            .keys()
            .map(|id| tables.provider(*id))
            .collect()
    }

    async fn get_activity_provider(&self, ap_uuid: Uuid) -> InveniraResult<ActivityProvider> {
        self.tables.read().provider(ap_uuid)
    }

    async fn get_activity_provider_activities(
        &self,
        ap_uuid: Uuid,
    ) -> InveniraResult<Vec<Activity>> {
        Ok(self.tables.read().provider(ap_uuid)?.activities)
    }

    async fn get_activities(&self) -> InveniraResult<Vec<Activity>> {
        Ok(self.tables.read().activities.values().cloned().collect())
    }

    async fn get_activity(&self, activity_uuid: Uuid) -> InveniraResult<Activity> {
        self.tables
            .read()
            .activities
            .get(&activity_uuid)
            .cloned()
            .ok_or_else(|| InveniraError::not_found(EntityKind::Activity, activity_uuid))
    }

    async fn get_iaps(&self) -> InveniraResult<Vec<Iap>> {
        let tables = self.tables.read();
        tables.iaps.keys().map(|id| tables.iap(*id)).collect()
    }

    async fn get_iap(&self, iap_uuid: Uuid) -> InveniraResult<Iap> {
        self.tables.read().iap(iap_uuid)
    }

    async fn create_activity_provider(
        &self,
        iap_uuid: Uuid,
        input: CreateActivityProvider,
        caller: &CallerIdentity,
    ) -> InveniraResult<ActivityProvider> {
        debug!(iap_uuid = %iap_uuid, name = %input.name, url = %input.url, "Saving Activity Provider");
        let mut tables = self.tables.write();

        if !tables.iaps.contains_key(&iap_uuid) {
            return Err(InveniraError::not_found(EntityKind::Iap, iap_uuid));
        }
        if tables
            .providers
            .values()
            .any(|p| p.name == input.name || p.url == input.url)
        {
            return Err(InveniraError::validation("Activity Provider already exists"));
        }

        let ap_uuid = Uuid::new_v4();
        tables.providers.insert(
            ap_uuid,
            ProviderRecord {
                name: input.name,
                description: input.description,
                url: input.url,
                activity_ids: Vec::new(),
                audit: AuditStamp::new(caller),
            },
        );
        if let Some(iap) = tables.iaps.get_mut(&iap_uuid) {
            iap.provider_ids.push(ap_uuid);
            iap.audit.touch(caller);
        }

        tables.provider(ap_uuid)
    }

    async fn remove_activity_provider(
        &self,
        ap_uuid: Uuid,
        caller: &CallerIdentity,
    ) -> InveniraResult<()> {
        debug!(ap_uuid = %ap_uuid, "Removing Activity Provider");
        let mut tables = self.tables.write();

        let record = tables
            .providers
            .get(&ap_uuid)
            .ok_or_else(|| InveniraError::not_found(EntityKind::ActivityProvider, ap_uuid))?;
        if !record.activity_ids.is_empty() {
            return Err(InveniraError::validation(format!(
                "Activity Provider with id {ap_uuid} contains Activities"
            )));
        }

        tables.providers.shift_remove(&ap_uuid);
        tables.touch_iaps_where(caller, |iap| iap.provider_ids.contains(&ap_uuid));
        for iap in tables.iaps.values_mut() {
            iap.provider_ids.retain(|id| *id != ap_uuid);
        }

        Ok(())
    }

    async fn create_activity(
        &self,
        iap_uuid: Uuid,
        input: CreateActivity,
        caller: &CallerIdentity,
    ) -> InveniraResult<Activity> {
        let ap_uuid = input.activity_provider_uuid;
        debug!(iap_uuid = %iap_uuid, ap_uuid = %ap_uuid, name = %input.name, "Saving Activity");
        let mut tables = self.tables.write();

        let iap = tables
            .iaps
            .get(&iap_uuid)
            .ok_or_else(|| InveniraError::not_found(EntityKind::Iap, iap_uuid))?;
        if !tables.providers.contains_key(&ap_uuid) {
            return Err(InveniraError::not_found(EntityKind::ActivityProvider, ap_uuid));
        }
        if !iap.provider_ids.contains(&ap_uuid) {
            return Err(InveniraError::validation(format!(
                "Activity Provider with id {ap_uuid} is not part of IAP with id {iap_uuid}"
            )));
        }

        let activity = Activity {
            activity_uuid: Uuid::new_v4(),
            activity_provider_uuid: ap_uuid,
            name: input.name,
            description: input.description,
            parameters: input.parameters,
            audit: AuditStamp::new(caller),
        };
        tables
            .activities
            .insert(activity.activity_uuid, activity.clone());

        if let Some(provider) = tables.providers.get_mut(&ap_uuid) {
            provider.activity_ids.push(activity.activity_uuid);
            provider.audit.touch(caller);
        }
        if let Some(iap) = tables.iaps.get_mut(&iap_uuid) {
            iap.audit.touch(caller);
        }

        Ok(activity)
    }

    async fn remove_activity(
        &self,
        activity_uuid: Uuid,
        caller: &CallerIdentity,
    ) -> InveniraResult<()> {
        debug!(activity_uuid = %activity_uuid, "Removing Activity");
        let mut tables = self.tables.write();

        let activity = tables
            .activities
            .shift_remove(&activity_uuid)
            .ok_or_else(|| InveniraError::not_found(EntityKind::Activity, activity_uuid))?;

        let ap_uuid = activity.activity_provider_uuid;
        if let Some(provider) = tables.providers.get_mut(&ap_uuid) {
            provider.activity_ids.retain(|id| *id != activity_uuid);
            provider.audit.touch(caller);
        }
        tables.touch_iaps_where(caller, |iap| iap.provider_ids.contains(&ap_uuid));

        Ok(())
    }

    async fn create_goal(
        &self,
        iap_uuid: Uuid,
        input: CreateGoal,
        caller: &CallerIdentity,
    ) -> InveniraResult<Goal> {
        debug!(iap_uuid = %iap_uuid, name = %input.name, "Saving Goal");
        let mut tables = self.tables.write();

        let iap = tables
            .iaps
            .get_mut(&iap_uuid)
            .ok_or_else(|| InveniraError::not_found(EntityKind::Iap, iap_uuid))?;

        let goal = Goal {
            goal_uuid: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            formula: input.formula,
            target_value: input.target_value,
            audit: AuditStamp::new(caller),
        };
        iap.goal_ids.push(goal.goal_uuid);
        iap.audit.touch(caller);
        tables.goals.insert(goal.goal_uuid, goal.clone());

        Ok(goal)
    }

    async fn remove_goal(&self, goal_uuid: Uuid, caller: &CallerIdentity) -> InveniraResult<()> {
        debug!(goal_uuid = %goal_uuid, "Removing Goal");
        let mut tables = self.tables.write();

        tables
            .goals
            .shift_remove(&goal_uuid)
            .ok_or_else(|| InveniraError::not_found(EntityKind::Goal, goal_uuid))?;

        for iap in tables.iaps.values_mut() {
            if iap.goal_ids.contains(&goal_uuid) {
                iap.goal_ids.retain(|id| *id != goal_uuid);
                iap.audit.touch(caller);
            }
        }

        Ok(())
    }

    async fn create_iap(&self, input: CreateIap, caller: &CallerIdentity) -> InveniraResult<Iap> {
        debug!(name = %input.name, "Creating IAP");
        let mut tables = self.tables.write();

        let iap_uuid = Uuid::new_v4();
        tables.iaps.insert(
            iap_uuid,
            IapRecord {
                name: input.name,
                description: input.description,
                provider_ids: Vec::new(),
                goal_ids: Vec::new(),
                is_deployed: false,
                deploy_urls: HashMap::new(),
                audit: AuditStamp::new(caller),
            },
        );

        tables.iap(iap_uuid)
    }

    async fn remove_iap(&self, iap_uuid: Uuid, caller: &CallerIdentity) -> InveniraResult<()> {
        debug!(iap_uuid = %iap_uuid, "Removing IAP");
        let mut tables = self.tables.write();

        let record = tables
            .iaps
            .shift_remove(&iap_uuid)
            .ok_or_else(|| InveniraError::not_found(EntityKind::Iap, iap_uuid))?;

        for goal_uuid in &record.goal_ids {
            tables.goals.shift_remove(goal_uuid);
        }
        for ap_uuid in &record.provider_ids {
            let Some(provider) = tables.providers.get_mut(ap_uuid) else {
                continue;
            };
            let activity_ids = std::mem::take(&mut provider.activity_ids);
            provider.audit.touch(caller);
            for activity_uuid in activity_ids {
                tables.activities.shift_remove(&activity_uuid);
            }
        }

        Ok(())
    }

    async fn deploy_iap(&self, iap_uuid: Uuid, caller: &CallerIdentity) -> InveniraResult<()> {
        debug!(iap_uuid = %iap_uuid, "Deploying IAP");
        let mut tables = self.tables.write();

        let iap = tables
            .iaps
            .get_mut(&iap_uuid)
            .ok_or_else(|| InveniraError::not_found(EntityKind::Iap, iap_uuid))?;
        if iap.is_deployed {
            return Err(InveniraError::AlreadyDeployed(iap_uuid));
        }

        iap.is_deployed = true;
        iap.audit.touch(caller);
        Ok(())
    }
}
