//! # Configuration
//!
//! Typed configuration for the server, the Activity Provider HTTP client and
//! structured logging.
//!
//! ## Sources
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`INVENIRA_*`, plus `PORT`)
//! 2. Config file (`$INVENIRA_CONFIG`, `./invenira.toml`, `./config/invenira.toml`)
//! 3. Default values
//!
//! ```rust,no_run
//! use invenira_core::config::InveniraConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = InveniraConfig::load()?;
//! println!("Listening on {}", config.web.bind_address);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

pub use error::{ConfigResult, ConfigurationError};

/// Root configuration structure mirroring `invenira.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InveniraConfig {
    /// Deployment environment (development, test, production)
    pub environment: String,

    /// HTTP transport settings
    pub web: WebConfig,

    /// Settings shared by every Activity Provider client handle
    pub provider_client: ProviderClientConfig,

    /// Structured logging settings
    pub logging: LoggingConfig,
}

/// Web API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Address to bind the web server to
    pub bind_address: String,

    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,

    /// Header carrying the caller identity used for audit stamps
    pub caller_header: String,

    /// Whether permissive CORS is enabled
    pub cors_enabled: bool,
}

/// Activity Provider HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderClientConfig {
    /// Total request timeout in milliseconds
    pub timeout_ms: u64,

    /// TCP connect timeout in milliseconds
    pub connect_timeout_ms: u64,

    /// User agent sent to Activity Providers
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Explicit filter directive (e.g. "info", "invenira_core=debug")
    pub level: Option<String>,

    /// Directory for JSON log files; console only when absent
    pub directory: Option<String>,
}

impl Default for InveniraConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            web: WebConfig::default(),
            provider_client: ProviderClientConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            request_timeout_ms: 30000,
            caller_header: "x-invenira-user".to_string(),
            cors_enabled: true,
        }
    }
}

impl Default for ProviderClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10000,
            connect_timeout_ms: 5000,
            user_agent: format!("invenira-core/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl WebConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        self.bind_address.parse().map_err(|e| {
            ConfigurationError::invalid_value(
                "web.bind_address",
                self.bind_address.clone(),
                format!("not a socket address: {e}"),
            )
        })
    }
}

impl ProviderClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl InveniraConfig {
    /// Reject values that would make the server misbehave at runtime.
    pub fn validate(&self) -> ConfigResult<()> {
        self.web.socket_addr()?;

        if self.web.request_timeout_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "web.request_timeout_ms",
                "0",
                "must be greater than zero",
            ));
        }
        if self.web.caller_header.trim().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "web.caller_header",
                "",
                "must not be empty",
            ));
        }
        if self.provider_client.timeout_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "provider_client.timeout_ms",
                "0",
                "must be greater than zero",
            ));
        }
        if self.provider_client.connect_timeout_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "provider_client.connect_timeout_ms",
                "0",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = InveniraConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.web.bind_address, "0.0.0.0:3000");
        assert_eq!(config.web.caller_header, "x-invenira-user");
        assert_eq!(config.provider_client.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_timeouts_are_rejected() {
        let mut config = InveniraConfig::default();
        config.provider_client.timeout_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidValue { ref field, .. }) if field == "provider_client.timeout_ms"
        ));

        let mut config = InveniraConfig::default();
        config.web.request_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_bind_address_is_rejected() {
        let mut config = InveniraConfig::default();
        config.web.bind_address = "localhost-ish".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: InveniraConfig = toml::from_str(
            r#"
            environment = "test"

            [web]
            bind_address = "127.0.0.1:4000"
            "#,
        )
        .unwrap();

        assert_eq!(config.environment, "test");
        assert_eq!(config.web.bind_address, "127.0.0.1:4000");
        assert_eq!(config.web.request_timeout_ms, 30000);
        assert_eq!(config.provider_client, ProviderClientConfig::default());
    }
}
