//! # Domain Models
//!
//! Entities persisted by the storage collaborator, the inputs used to create
//! them and the values derived from remote Activity Provider contracts.
//!
//! Every persisted entity carries an [`AuditStamp`] populated from an
//! explicit [`CallerIdentity`].

pub mod activity;
pub mod activity_provider;
pub mod audit;
pub mod goal;
pub mod iap;
pub mod metric;

pub use activity::{Activity, CreateActivity};
pub use activity_provider::{ActivityProvider, CreateActivityProvider};
pub use audit::{AuditStamp, CallerIdentity, ANONYMOUS_CALLER};
pub use goal::{CreateGoal, Goal};
pub use iap::{CreateIap, Iap};
pub use metric::{MetricDescriptor, DEFAULT_METRIC_TYPE};
