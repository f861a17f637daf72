//! Bounded entry store with least-recently-used eviction

use crate::cache::entry::CacheEntry;
use crate::cache::types::CacheKey;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Fixed-capacity key -> entry map.
///
/// Freshness is not checked here; the facade decides what a stored entry is
/// worth. Every operation that reads an entry by key (`get`, `set`) marks it
/// most recently used; `peek` and `keys` do not.
pub struct EntryStore<T> {
    entries: LruCache<CacheKey, CacheEntry<T>>,
}

impl<T> EntryStore<T> {
    /// Create a store holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Look up an entry and mark it most recently used
    pub fn get(&mut self, key: &str) -> Option<&CacheEntry<T>> {
        self.entries.get(key)
    }

    /// Look up an entry without touching recency
    pub fn peek(&self, key: &str) -> Option<&CacheEntry<T>> {
        self.entries.peek(key)
    }

    /// Insert or replace an entry.
    ///
    /// Returns whatever left the store as a result: the previous entry under
    /// the same key, or the least-recently-used entry evicted to stay within
    /// capacity. At most one entry is displaced per call.
    pub fn set(&mut self, key: CacheKey, entry: CacheEntry<T>) -> Option<(CacheKey, CacheEntry<T>)> {
        self.entries.push(key, entry)
    }

    /// Remove an entry; `None` if it was not present
    pub fn delete(&mut self, key: &str) -> Option<CacheEntry<T>> {
        self.entries.pop(key)
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Snapshot of stored keys, most recently used first
    pub fn keys(&self) -> Vec<CacheKey> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Keys whose entries outlived the TTL they were written with
    pub fn expired_keys(&self) -> Vec<CacheKey> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn entry(value: &str) -> CacheEntry<String> {
        CacheEntry::new(value.to_string(), Vec::new(), Duration::from_secs(60))
    }

    #[test]
    fn test_set_and_get() {
        let mut store = EntryStore::new(10);
        assert!(store.set("a".to_string(), entry("1")).is_none());

        assert_eq!(store.get("a").map(|e| e.data.as_str()), Some("1"));
        assert!(store.get("missing").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut store = EntryStore::new(10);
        store.set("a".to_string(), entry("old"));

        let displaced = store.set("a".to_string(), entry("new"));
        let (key, previous) = displaced.unwrap();
        assert_eq!(key, "a");
        assert_eq!(previous.data, "old");
        assert_eq!(store.len(), 1);
        assert_eq!(store.peek("a").unwrap().data, "new");
    }

    #[test]
    fn test_evicts_least_recently_inserted() {
        let mut store = EntryStore::new(2);
        store.set("a".to_string(), entry("1"));
        store.set("b".to_string(), entry("2"));

        let (evicted, _) = store.set("c".to_string(), entry("3")).unwrap();
        assert_eq!(evicted, "a");
        assert!(!store.contains("a"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut store = EntryStore::new(2);
        store.set("a".to_string(), entry("1"));
        store.set("b".to_string(), entry("2"));
        store.get("a");

        let (evicted, _) = store.set("c".to_string(), entry("3")).unwrap();
        assert_eq!(evicted, "b");
        assert!(store.contains("a"));
    }

    #[test]
    fn test_peek_does_not_refresh_recency() {
        let mut store = EntryStore::new(2);
        store.set("a".to_string(), entry("1"));
        store.set("b".to_string(), entry("2"));
        store.peek("a");

        let (evicted, _) = store.set("c".to_string(), entry("3")).unwrap();
        assert_eq!(evicted, "a");
    }

    #[test]
    fn test_delete_and_clear() {
        let mut store = EntryStore::new(4);
        store.set("a".to_string(), entry("1"));
        store.set("b".to_string(), entry("2"));

        assert!(store.delete("a").is_some());
        assert!(store.delete("a").is_none());
        assert_eq!(store.keys(), vec!["b".to_string()]);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 4);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let store: EntryStore<String> = EntryStore::new(0);
        assert_eq!(store.capacity(), 1);
    }

    #[test]
    fn test_expired_keys() {
        let mut store = EntryStore::new(4);
        store.set(
            "short".to_string(),
            CacheEntry::new("x".to_string(), Vec::new(), Duration::from_millis(10)),
        );
        store.set("long".to_string(), entry("y"));

        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(store.expired_keys(), vec!["short".to_string()]);
    }
}
