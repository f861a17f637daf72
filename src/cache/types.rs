//! Core type definitions for the cache system

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cache key type - opaque string naming one query result
pub type CacheKey = String;

/// Point-in-time snapshot of cache occupancy and activity
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CacheStats {
    /// Number of entries currently stored
    pub size: usize,

    /// Configured entry capacity
    pub max_size: usize,

    /// Number of tags with at least one live key
    pub tags: usize,

    /// Lookups answered from a fresh entry
    pub hits: u64,

    /// Lookups that had to run the compute function
    pub misses: u64,

    /// Entries pushed out by capacity pressure
    pub evictions: u64,

    /// Entries removed by key, tag, pattern, sweep or clear
    pub invalidations: u64,

    /// Compute functions that returned an error
    pub compute_errors: u64,
}

impl CacheStats {
    /// Calculate cache hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Fraction of capacity in use, as a percentage
    pub fn utilization(&self) -> f64 {
        if self.max_size == 0 {
            0.0
        } else {
            (self.size as f64 / self.max_size as f64) * 100.0
        }
    }

    /// Serialize for the admin stats endpoint
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheStats {{ size: {}/{} ({:.1}%), tags: {}, hits: {}, misses: {}, hit_rate: {:.2}%, evictions: {}, invalidations: {} }}",
            self.size,
            self.max_size,
            self.utilization(),
            self.tags,
            self.hits,
            self.misses,
            self.hit_rate(),
            self.evictions,
            self.invalidations
        )
    }
}
