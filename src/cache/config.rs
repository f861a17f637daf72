//! Configuration for the query cache

use crate::error::{CacheError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the entry capacity
pub const ENV_MAX_ENTRIES: &str = "PORTAL_CACHE_MAX_ENTRIES";
/// Environment variable holding the default TTL in milliseconds
pub const ENV_DEFAULT_TTL_MS: &str = "PORTAL_CACHE_DEFAULT_TTL_MS";
/// Environment variable holding the background sweep interval in milliseconds
pub const ENV_CLEANUP_INTERVAL_MS: &str = "PORTAL_CACHE_CLEANUP_INTERVAL_MS";
/// Environment variable toggling single-flight de-duplication
pub const ENV_SINGLE_FLIGHT: &str = "PORTAL_CACHE_SINGLE_FLIGHT";

/// Configuration for the query cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL applied when a `get` call does not pass its own
    pub default_ttl: Duration,

    /// Maximum number of entries held at once
    pub max_entries: usize,

    /// Share one in-flight computation between concurrent misses on a key
    pub single_flight: bool,

    /// Interval for the background stale-entry sweep
    pub cleanup_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            // 5 minutes
            default_ttl: Duration::from_secs(300),
            max_entries: 1_000,
            single_flight: true,
            // Sweep every 10 minutes
            cleanup_interval: Duration::from_secs(600),
        }
    }
}

impl CacheConfig {
    /// Create a new builder for cache configuration
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::ConfigError(
                "max_entries must be greater than 0".to_string(),
            ));
        }

        if self.default_ttl.is_zero() {
            return Err(CacheError::ConfigError(
                "default_ttl must be greater than 0".to_string(),
            ));
        }

        if self.cleanup_interval.is_zero() {
            return Err(CacheError::ConfigError(
                "cleanup_interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present.
    /// Unset variables fall back to [`CacheConfig::default`]; set but
    /// unparsable ones are an error rather than silently ignored.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(raw) = lookup(ENV_MAX_ENTRIES) {
            builder = builder.max_entries(parse_var(ENV_MAX_ENTRIES, &raw)?);
        }
        if let Some(raw) = lookup(ENV_DEFAULT_TTL_MS) {
            builder = builder.default_ttl(Duration::from_millis(parse_var(ENV_DEFAULT_TTL_MS, &raw)?));
        }
        if let Some(raw) = lookup(ENV_CLEANUP_INTERVAL_MS) {
            builder = builder.cleanup_interval(Duration::from_millis(parse_var(
                ENV_CLEANUP_INTERVAL_MS,
                &raw,
            )?));
        }
        if let Some(raw) = lookup(ENV_SINGLE_FLIGHT) {
            builder = builder.single_flight(parse_var(ENV_SINGLE_FLIGHT, &raw)?);
        }

        let config = builder.build();
        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| CacheError::ConfigError(format!("{}={:?}: {}", name, raw, e)))
}

/// Builder for cache configuration
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    default_ttl: Option<Duration>,
    max_entries: Option<usize>,
    single_flight: Option<bool>,
    cleanup_interval: Option<Duration>,
}

impl CacheConfigBuilder {
    /// Set default TTL for cache entries
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Set maximum number of cache entries
    pub fn max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }

    /// Enable or disable single-flight de-duplication
    pub fn single_flight(mut self, enable: bool) -> Self {
        self.single_flight = Some(enable);
        self
    }

    /// Set cleanup interval
    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = Some(interval);
        self
    }

    /// Build the cache configuration
    pub fn build(self) -> CacheConfig {
        let defaults = CacheConfig::default();

        CacheConfig {
            default_ttl: self.default_ttl.unwrap_or(defaults.default_ttl),
            max_entries: self.max_entries.unwrap_or(defaults.max_entries),
            single_flight: self.single_flight.unwrap_or(defaults.single_flight),
            cleanup_interval: self.cleanup_interval.unwrap_or(defaults.cleanup_interval),
        }
    }
}
