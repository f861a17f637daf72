//! Cache key composition for portal resources
//!
//! Keys take the shape `resource:identifier?name=value&...` so admin tools can
//! target a whole resource with a pattern such as `event:*`.

use crate::cache::types::CacheKey;
use serde::{Deserialize, Serialize};

/// Resource family a cached read belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Event listing
    Events,

    /// Single event
    Event,

    /// Attendance records of an event
    Attendance,

    /// Order / registration
    Order,

    /// User profile and registrations
    User,

    /// Admin report
    Report,

    /// Custom resource type
    Custom(String),
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Events => write!(f, "events"),
            Resource::Event => write!(f, "event"),
            Resource::Attendance => write!(f, "attendance"),
            Resource::Order => write!(f, "order"),
            Resource::User => write!(f, "user"),
            Resource::Report => write!(f, "report"),
            Resource::Custom(s) => write!(f, "custom:{}", s),
        }
    }
}

/// Cache key builder for portal reads
#[derive(Debug, Clone)]
pub struct CacheKeyBuilder {
    resource: Resource,
    identifier: String,
    params: Vec<(String, String)>,
}

impl CacheKeyBuilder {
    /// Create a new cache key builder
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            identifier: String::new(),
            params: Vec::new(),
        }
    }

    /// Set the primary identifier
    pub fn identifier(mut self, id: impl Into<String>) -> Self {
        self.identifier = id.into();
        self
    }

    /// Add a query parameter to the key
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Build the cache key.
    ///
    /// Parameters are sorted so handlers that add them in a different order
    /// still share one entry.
    pub fn build(mut self) -> CacheKey {
        let mut key = if self.identifier.is_empty() {
            self.resource.to_string()
        } else {
            format!("{}:{}", self.resource, self.identifier)
        };

        if !self.params.is_empty() {
            self.params.sort();
            let params_str: Vec<String> = self
                .params
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            key.push('?');
            key.push_str(&params_str.join("&"));
        }

        key
    }
}
