//! # Storage
//!
//! [`DbService`] is the repository-style contract the orchestration core
//! persists through. Every lookup by id fails with `NotFound` when the id
//! does not resolve; every mutation takes the caller identity used for audit
//! stamps.
//!
//! [`InMemoryDbService`] is the bundled implementation.

pub mod in_memory;

use async_trait::async_trait;
use std::fmt::Debug;
use uuid::Uuid;

use crate::error::InveniraResult;
use crate::models::{
    Activity, ActivityProvider, CallerIdentity, CreateActivity, CreateActivityProvider,
    CreateGoal, CreateIap, Goal, Iap,
};

pub use in_memory::InMemoryDbService;

#[async_trait]
pub trait DbService: Send + Sync + Debug {
    async fn get_activity_providers(&self) -> InveniraResult<Vec<ActivityProvider>>;

    async fn get_activity_provider(&self, ap_uuid: Uuid) -> InveniraResult<ActivityProvider>;

    async fn get_activity_provider_activities(&self, ap_uuid: Uuid)
        -> InveniraResult<Vec<Activity>>;

    async fn get_activities(&self) -> InveniraResult<Vec<Activity>>;

    async fn get_activity(&self, activity_uuid: Uuid) -> InveniraResult<Activity>;

    async fn get_iaps(&self) -> InveniraResult<Vec<Iap>>;

    /// The assembled aggregate: providers with their activities, and goals
    async fn get_iap(&self, iap_uuid: Uuid) -> InveniraResult<Iap>;

    /// Registers a provider and attaches it to the IAP. Name and URL are
    /// unique across all providers.
    async fn create_activity_provider(
        &self,
        iap_uuid: Uuid,
        input: CreateActivityProvider,
        caller: &CallerIdentity,
    ) -> InveniraResult<ActivityProvider>;

    /// Rejected while the provider still owns activities
    async fn remove_activity_provider(
        &self,
        ap_uuid: Uuid,
        caller: &CallerIdentity,
    ) -> InveniraResult<()>;

    /// The activity's provider must already be part of the IAP
    async fn create_activity(
        &self,
        iap_uuid: Uuid,
        input: CreateActivity,
        caller: &CallerIdentity,
    ) -> InveniraResult<Activity>;

    async fn remove_activity(
        &self,
        activity_uuid: Uuid,
        caller: &CallerIdentity,
    ) -> InveniraResult<()>;

    async fn create_goal(
        &self,
        iap_uuid: Uuid,
        input: CreateGoal,
        caller: &CallerIdentity,
    ) -> InveniraResult<Goal>;

    async fn remove_goal(&self, goal_uuid: Uuid, caller: &CallerIdentity) -> InveniraResult<()>;

    async fn create_iap(&self, input: CreateIap, caller: &CallerIdentity) -> InveniraResult<Iap>;

    /// Deletes the IAP with its goals and its providers' activities. The
    /// providers themselves are kept.
    async fn remove_iap(&self, iap_uuid: Uuid, caller: &CallerIdentity) -> InveniraResult<()>;

    /// Flips `is_deployed`; fails with `AlreadyDeployed` the second time
    async fn deploy_iap(&self, iap_uuid: Uuid, caller: &CallerIdentity) -> InveniraResult<()>;
}
