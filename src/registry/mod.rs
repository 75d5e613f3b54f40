//! # Registry
//!
//! Process-lifetime cache of Activity Provider client handles.
//!
//! ```rust
//! use invenira_core::config::ProviderClientConfig;
//! use invenira_core::provider_client::HttpClientFactory;
//! use invenira_core::registry::ProviderClientRegistry;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = HttpClientFactory::new(&ProviderClientConfig::default())?;
//! let registry = ProviderClientRegistry::new(Arc::new(factory));
//!
//! let first = registry.client_for("http://localhost:9000")?;
//! let second = registry.client_for("http://localhost:9000")?;
//! assert!(Arc::ptr_eq(&first, &second));
//! # Ok(())
//! # }
//! ```

pub mod provider_client_registry;

pub use provider_client_registry::{ProviderClientRegistry, RegistryCacheStats};
