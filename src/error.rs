//! Error types for cache operations
//!
//! Failures of the caller's compute function are never wrapped here; they are
//! handed back to the caller unchanged. `CacheError` only covers the cache's
//! own failure modes: bad configuration and unusable invalidation patterns.

use thiserror::Error;

/// Main error type for cache operations
#[derive(Error, Debug)]
pub enum CacheError {
    /// Configuration error - invalid values or unparsable environment variables
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalidation pattern could not be compiled
    #[error("Invalid key pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CacheError::ConfigError("max_entries must be greater than 0".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: max_entries must be greater than 0"
        );

        let pattern_error = CacheError::InvalidPattern {
            pattern: "user:*".to_string(),
            reason: "too big".to_string(),
        };
        assert!(pattern_error.to_string().contains("'user:*'"));
        assert!(pattern_error.to_string().contains("too big"));
    }

    #[test]
    fn test_error_conversion() {
        let json_error = serde_json::from_str::<u32>("not json").unwrap_err();
        let error: CacheError = json_error.into();
        assert!(matches!(error, CacheError::SerializationError(_)));
    }
}
