//! Cache entry with freshness tracking

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// A cached query result together with its write time and tags
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub data: T,

    /// When the value was computed (monotonic, used for freshness)
    pub timestamp: Instant,

    /// Wall-clock creation time, for reporting
    pub created_at: DateTime<Utc>,

    /// Tags for group invalidation, in insertion order without duplicates
    pub tags: Vec<String>,

    /// TTL the writer asked for; only the background sweep reads it
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    /// Create a new entry stamped with the current time
    pub fn new(data: T, tags: Vec<String>, ttl: Duration) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !deduped.contains(&tag) {
                deduped.push(tag);
            }
        }

        Self {
            data,
            timestamp: Instant::now(),
            created_at: Utc::now(),
            tags: deduped,
            ttl,
        }
    }

    /// Get the age of the entry
    pub fn age(&self) -> Duration {
        self.timestamp.elapsed()
    }

    /// Fresh means strictly younger than `ttl`
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }

    /// Whether the entry outlived the TTL it was written with
    pub fn is_expired(&self) -> bool {
        !self.is_fresh(self.ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_cache_entry_creation() {
        let entry = CacheEntry::new(7u32, vec!["events".to_string()], Duration::from_secs(60));

        assert_eq!(entry.data, 7);
        assert_eq!(entry.tags, vec!["events".to_string()]);
        assert!(entry.is_fresh(Duration::from_secs(60)));
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_duplicate_tags_collapse() {
        let entry = CacheEntry::new(
            (),
            vec!["a".to_string(), "b".to_string(), "a".to_string()],
            Duration::from_secs(1),
        );
        assert_eq!(entry.tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_freshness_boundary() {
        let entry = CacheEntry::new("v", Vec::new(), Duration::from_millis(50));

        // A zero ttl never counts as fresh
        assert!(!entry.is_fresh(Duration::ZERO));

        sleep(Duration::from_millis(70));
        assert!(!entry.is_fresh(Duration::from_millis(50)));
        assert!(entry.is_fresh(Duration::from_secs(60)));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_age() {
        let entry = CacheEntry::new("v", Vec::new(), Duration::from_secs(3600));
        sleep(Duration::from_millis(10));
        assert!(entry.age() >= Duration::from_millis(10));
    }
}
