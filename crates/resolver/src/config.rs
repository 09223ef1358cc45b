//! Resolver configuration

use std::env;
use std::time::Duration;

/// Configuration for the enrichment phase and the resolution cache,
/// loaded from environment variables
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// URL scheme used when computing domain URLs ("http" or "https")
    pub url_scheme: String,
    /// Path prefix written onto every loaded record; must start with '/'
    pub base_path: String,
    /// TTL for cached lookups; zero disables the cache
    pub cache_ttl: Duration,
}

impl ResolverConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let url_scheme = env::var("HOSTMUX_URL_SCHEME").unwrap_or_else(|_| "https".to_string());
        if url_scheme != "http" && url_scheme != "https" {
            return Err(ConfigError::Invalid(
                "HOSTMUX_URL_SCHEME must be \"http\" or \"https\"",
            ));
        }

        let base_path = env::var("HOSTMUX_BASE_PATH").unwrap_or_else(|_| "/".to_string());
        if !base_path.starts_with('/') {
            return Err(ConfigError::Invalid(
                "HOSTMUX_BASE_PATH must start with '/'",
            ));
        }

        let cache_ttl_secs: u64 = env::var("HOSTMUX_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .unwrap_or(300);

        Ok(Self {
            url_scheme,
            base_path,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
        })
    }

    /// The slice of this config consumed by the pipeline's internal phase
    pub fn enrichment(&self) -> EnrichmentConfig {
        EnrichmentConfig {
            scheme: self.url_scheme.clone(),
            base_path: self.base_path.clone(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            url_scheme: "https".to_string(),
            base_path: "/".to_string(),
            cache_ttl: Duration::from_secs(300),
        }
    }
}

/// Injected configuration for computing `path` and `url` on load
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    pub scheme: String,
    pub base_path: String,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        ResolverConfig::default().enrichment()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}
