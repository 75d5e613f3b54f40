#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Inven!RA Core
//!
//! Orchestration backend for Inventive Activity Plans (IAPs): educational
//! plans composed of third-party Activity Providers, the Activities they
//! host and the Goals measured over them.
//!
//! ## Overview
//!
//! Besides CRUD over the IAP aggregate, the core talks to remote Activity
//! Providers over HTTP to:
//!
//! - discover a provider's configuration contract and validate Activity
//!   parameters against it before they are stored
//! - deploy every Activity of an IAP to its provider, fail-fast and without
//!   compensation
//! - aggregate the analytics metrics every Activity exposes
//!
//! ## Module Organization
//!
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Error taxonomy (`NotFound` / `BadRequest` / `Internal` classes)
//! - [`logging`] - Structured logging setup
//! - [`models`] - Entities, inputs and audit stamps
//! - [`provider_client`] - Activity Provider HTTP client
//! - [`registry`] - Per-URL client handle cache
//! - [`validation`] - Parameter contract validation
//! - [`orchestration`] - Deployment and metrics aggregation
//! - [`database`] - Storage contract and in-memory implementation
//! - [`services`] - `IapService` composition root
//! - [`web`] - Axum REST API
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use invenira_core::config::InveniraConfig;
//! use invenira_core::database::InMemoryDbService;
//! use invenira_core::models::{CallerIdentity, CreateIap};
//! use invenira_core::provider_client::HttpClientFactory;
//! use invenira_core::registry::ProviderClientRegistry;
//! use invenira_core::services::IapService;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = InveniraConfig::load()?;
//! let factory = HttpClientFactory::new(&config.provider_client)?;
//! let registry = Arc::new(ProviderClientRegistry::new(Arc::new(factory)));
//! let service = IapService::new(Arc::new(InMemoryDbService::new()), registry);
//!
//! let caller = CallerIdentity::new("instructor@example.com");
//! let iap = service
//!     .create_iap(
//!         CreateIap {
//!             name: "Algebra I".to_string(),
//!             description: "First term".to_string(),
//!         },
//!         &caller,
//!     )
//!     .await?;
//! println!("Created IAP {}", iap.iap_uuid);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod provider_client;
pub mod registry;
pub mod services;
pub mod validation;
pub mod web;

pub use config::InveniraConfig;
pub use error::{EntityKind, ErrorClass, InveniraError, InveniraResult};
pub use services::IapService;
