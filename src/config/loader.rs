//! Configuration Loader
//!
//! File discovery, TOML parsing and environment variable overrides.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::{ConfigResult, ConfigurationError};
use super::InveniraConfig;

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "INVENIRA_CONFIG";

impl InveniraConfig {
    /// Load configuration from the config file (if any) and the process
    /// environment, then validate it.
    pub fn load() -> ConfigResult<Self> {
        let mut config = match Self::find_config_file()? {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file");
                Self::load_from_file(&path)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides()?;
        config.validate()?;

        debug!(
            environment = %config.environment,
            bind_address = %config.web.bind_address,
            provider_timeout_ms = config.provider_client.timeout_ms,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::file_read_error(path.display().to_string(), e))?;

        toml::from_str(&content)
            .map_err(|e| ConfigurationError::invalid_toml(path.display().to_string(), e))
    }

    /// An explicit `INVENIRA_CONFIG` must exist; the conventional locations
    /// are optional.
    fn find_config_file() -> ConfigResult<Option<PathBuf>> {
        if let Ok(explicit) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(explicit);
            if !path.is_file() {
                return Err(ConfigurationError::ConfigFileNotFound { path });
            }
            return Ok(Some(path));
        }

        let candidates = [
            Path::new("./invenira.toml"),
            Path::new("./config/invenira.toml"),
        ];

        Ok(candidates
            .iter()
            .find(|path| path.is_file())
            .map(|path| path.to_path_buf()))
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup, so tests don't have to
    /// mutate the process environment.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(environment) = lookup("INVENIRA_ENV") {
            self.environment = environment;
        }

        if let Some(bind_address) = lookup("INVENIRA_BIND_ADDRESS") {
            self.web.bind_address = bind_address;
        }
        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|e| ConfigurationError::environment_override("PORT", e))?;
            let host = self
                .web
                .bind_address
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            self.web.bind_address = format!("{host}:{port}");
        }
        if let Some(timeout) = lookup("INVENIRA_REQUEST_TIMEOUT_MS") {
            self.web.request_timeout_ms = timeout.parse().map_err(|e| {
                ConfigurationError::environment_override("INVENIRA_REQUEST_TIMEOUT_MS", e)
            })?;
        }

        if let Some(timeout) = lookup("INVENIRA_PROVIDER_TIMEOUT_MS") {
            self.provider_client.timeout_ms = timeout.parse().map_err(|e| {
                ConfigurationError::environment_override("INVENIRA_PROVIDER_TIMEOUT_MS", e)
            })?;
        }

        if let Some(level) = lookup("INVENIRA_LOG_LEVEL") {
            self.logging.level = Some(level);
        }
        if let Some(directory) = lookup("INVENIRA_LOG_DIR") {
            self.logging.directory = Some(directory);
        }

        Ok(())
    }
}
