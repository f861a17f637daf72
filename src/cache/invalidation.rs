//! Why entries leave the cache
//!
//! The facade removes entries for several reasons: explicit invalidation by
//! key, tag or key pattern, capacity eviction, replacement by a fresh write,
//! the background sweep, and `clear`. Each path logs its reason and bulk
//! paths report an [`InvalidationEvent`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reason for cache invalidation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationReason {
    /// Manual invalidation by key
    Manual,

    /// Invalidated by tag match
    TagMatch { tag: String },

    /// Invalidated by key pattern
    PatternMatch { pattern: String },

    /// Outlived the TTL it was written with (background sweep)
    Expired,

    /// Evicted by LRU policy
    LeastRecentlyUsed,

    /// Overwritten by a fresh value for the same key
    Replaced,

    /// Whole cache cleared
    Cleared,
}

impl std::fmt::Display for InvalidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidationReason::Manual => write!(f, "manual invalidation"),
            InvalidationReason::TagMatch { tag } => write!(f, "tag match: {}", tag),
            InvalidationReason::PatternMatch { pattern } => write!(f, "pattern match: {}", pattern),
            InvalidationReason::Expired => write!(f, "TTL expired"),
            InvalidationReason::LeastRecentlyUsed => write!(f, "LRU eviction"),
            InvalidationReason::Replaced => write!(f, "replaced"),
            InvalidationReason::Cleared => write!(f, "cache cleared"),
        }
    }
}

/// Record of a bulk invalidation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidationEvent {
    /// Reason for invalidation
    pub reason: InvalidationReason,

    /// When the invalidation occurred
    pub timestamp: DateTime<Utc>,

    /// Keys that were invalidated
    pub keys: Vec<String>,

    /// Additional context
    pub context: Option<String>,
}

impl InvalidationEvent {
    /// Create a new invalidation event
    pub fn new(reason: InvalidationReason, keys: Vec<String>) -> Self {
        Self {
            reason,
            timestamp: Utc::now(),
            keys,
            context: None,
        }
    }

    /// Add context to the event
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }

    /// Number of keys removed
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
