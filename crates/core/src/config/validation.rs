//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err.to_string())
    }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `user_agent` is empty
    /// - `max_redirects` is 0 or exceeds 50
    /// - `read_timeout_ms` is set below 100ms or above 5 minutes
    /// - `search_endpoint` has no `{query}` placeholder
    /// - `max_results` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.max_redirects == 0 {
            return Err(ConfigError::Invalid {
                field: "max_redirects".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.max_redirects > 50 {
            return Err(ConfigError::Invalid { field: "max_redirects".into(), reason: "must not exceed 50".into() });
        }

        if let Some(timeout_ms) = self.read_timeout_ms {
            if timeout_ms < 100 {
                return Err(ConfigError::Invalid {
                    field: "read_timeout_ms".into(),
                    reason: "must be at least 100ms".into(),
                });
            }
            if timeout_ms > 300_000 {
                return Err(ConfigError::Invalid {
                    field: "read_timeout_ms".into(),
                    reason: "must not exceed 5 minutes (300000ms)".into(),
                });
            }
        }

        if !self.search_endpoint.contains("{query}") {
            return Err(ConfigError::Invalid {
                field: "search_endpoint".into(),
                reason: "must contain a {query} placeholder".into(),
            });
        }

        if self.max_results == 0 {
            return Err(ConfigError::Invalid { field: "max_results".into(), reason: "must be greater than 0".into() });
        }

        if self.cache_dir.as_os_str().is_empty() {
            tracing::warn!("cache_dir is empty; cache files will land in the working directory");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_max_redirects_zero() {
        let config = AppConfig { max_redirects: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_redirects"));
    }

    #[test]
    fn test_validate_max_redirects_exceeds_limit() {
        let config = AppConfig { max_redirects: 51, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_redirects"));
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = AppConfig { read_timeout_ms: Some(50), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "read_timeout_ms"));
    }

    #[test]
    fn test_validate_timeout_exceeds_limit() {
        let config = AppConfig { read_timeout_ms: Some(301_000), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "read_timeout_ms"));
    }

    #[test]
    fn test_validate_endpoint_without_placeholder() {
        let config = AppConfig { search_endpoint: "https://example.com/search".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "search_endpoint"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig { max_redirects: 50, read_timeout_ms: Some(100), max_results: 1, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_error_into_error() {
        let err: crate::Error = ConfigError::LoadFailed("bad toml".into()).into();
        assert!(err.to_string().starts_with("CONFIG_ERROR"));
    }
}
