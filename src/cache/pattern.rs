//! Glob-style key patterns for bulk invalidation

use crate::error::{CacheError, Result};
use regex::Regex;

/// A key pattern where `*` matches any run of characters (including none).
///
/// Every other character is literal. A key matches when the pattern occurs
/// anywhere in it, so `user:*` also matches `admin:user:42` and the empty
/// pattern matches every key.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    source: String,
    regex: Regex,
}

impl KeyPattern {
    /// Compile a pattern
    pub fn new(pattern: &str) -> Result<Self> {
        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        let regex = Regex::new(&format!("(?s:{})", body)).map_err(|e| CacheError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }
}
