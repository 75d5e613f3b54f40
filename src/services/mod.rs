//! # Services
//!
//! Business logic consumed by the transport layer.
//!
//! ```text
//! Handler -> IapService -> { ParameterContractValidator, DeploymentOrchestrator, MetricsAggregator }
//!                       -> DbService
//! ```

pub mod iap_service;

pub use iap_service::IapService;
