//! # Orchestration
//!
//! Multi-provider workflows over an IAP aggregate.
//!
//! ## Core Components
//!
//! - **DeploymentOrchestrator**: instructs every Activity's provider to start
//!   collecting metrics, then marks the IAP deployed
//! - **MetricsAggregator**: collects the analytics contracts of every
//!   Activity into one namespaced metric list
//!
//! Both walk the aggregate in storage order (provider, then activity) and
//! issue remote calls one at a time. Any remote failure aborts the walk.

pub mod deployment;
pub mod metrics;

pub use deployment::{DeploymentOrchestrator, DeploymentReport};
pub use metrics::{sanitize_metric_prefix, MetricsAggregator};
