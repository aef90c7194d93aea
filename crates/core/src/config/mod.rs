//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (GO2WEB_*)
//! 2. TOML config file (if GO2WEB_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Default search endpoint; `{query}` is replaced by the form-encoded query.
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/?q={query}";

/// Selector matching one anchor per search result on the default endpoint.
pub const DEFAULT_SEARCH_SELECTOR: &str = "a.result__a";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (GO2WEB_*)
/// 2. TOML config file (if GO2WEB_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding one file per cached response.
    ///
    /// Set via GO2WEB_CACHE_DIR environment variable.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// User-Agent string sent with every request.
    ///
    /// Set via GO2WEB_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Redirect hop budget per fetch.
    ///
    /// Set via GO2WEB_MAX_REDIRECTS environment variable.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Bound on a single request/response exchange, in milliseconds.
    ///
    /// Unset means the transport waits for the peer to close, however long
    /// that takes. Set via GO2WEB_READ_TIMEOUT_MS environment variable.
    #[serde(default)]
    pub read_timeout_ms: Option<u64>,

    /// Search endpoint template containing a `{query}` placeholder.
    ///
    /// Set via GO2WEB_SEARCH_ENDPOINT environment variable.
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,

    /// CSS selector for result anchors in the search page.
    ///
    /// Set via GO2WEB_SEARCH_SELECTOR environment variable.
    #[serde(default = "default_search_selector")]
    pub search_selector: String,

    /// Maximum number of search results kept.
    ///
    /// Set via GO2WEB_MAX_RESULTS environment variable.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_cache_dir() -> PathBuf {
    match home::home_dir() {
        Some(home) => home.join(".cache").join("go2web"),
        None => PathBuf::from("./.go2web-cache"),
    }
}

fn default_user_agent() -> String {
    "go2web/0.1".into()
}

fn default_max_redirects() -> usize {
    10
}

fn default_search_endpoint() -> String {
    DEFAULT_SEARCH_ENDPOINT.into()
}

fn default_search_selector() -> String {
    DEFAULT_SEARCH_SELECTOR.into()
}

fn default_max_results() -> usize {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
            read_timeout_ms: None,
            search_endpoint: default_search_endpoint(),
            search_selector: default_search_selector(),
            max_results: default_max_results(),
        }
    }
}

impl AppConfig {
    /// Read timeout as Duration, if one is configured.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `GO2WEB_`
    /// 2. TOML file from `GO2WEB_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or environment cannot be parsed,
    /// or if validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("GO2WEB_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("GO2WEB_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into()),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
