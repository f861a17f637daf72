//! Query cache facade: get-or-compute with tag and pattern invalidation

use crate::cache::{
    config::CacheConfig,
    entry::CacheEntry,
    flight::FlightMap,
    invalidation::{InvalidationEvent, InvalidationReason},
    pattern::KeyPattern,
    policy::QueryOptions,
    store::EntryStore,
    tags::TagIndex,
    types::{CacheKey, CacheStats},
};
use crate::error::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Tag-aware, time-bound cache in front of expensive reads.
///
/// This implementation provides:
/// - Get-or-compute with a per-call TTL
/// - LRU eviction at a fixed entry capacity
/// - Bulk invalidation by tag or `*` key pattern
/// - Single-flight de-duplication of concurrent misses on one key
///
/// Construct one per application and share it behind an `Arc`.
pub struct QueryCache<T> {
    /// Cache configuration
    config: CacheConfig,

    /// Entries, tag index and counters, always mutated together
    state: RwLock<CacheState<T>>,

    /// Gates for computations currently running
    flights: FlightMap,
}

struct CacheState<T> {
    entries: EntryStore<T>,
    tags: TagIndex,
    counters: Counters,
}

#[derive(Debug, Default)]
struct Counters {
    hits: u64,
    misses: u64,
    evictions: u64,
    invalidations: u64,
    compute_errors: u64,
}

impl<T> CacheState<T> {
    /// Store an entry and keep the tag index in step with whatever it displaced
    fn insert(&mut self, key: CacheKey, entry: CacheEntry<T>) {
        let tags = entry.tags.clone();

        if let Some((displaced_key, displaced)) = self.entries.set(key.clone(), entry) {
            let reason = if displaced_key == key {
                InvalidationReason::Replaced
            } else {
                self.counters.evictions += 1;
                InvalidationReason::LeastRecentlyUsed
            };
            for tag in &displaced.tags {
                self.tags.dissociate(tag, &displaced_key);
            }
            debug!("Dropped cache entry {} ({})", displaced_key, reason);
        }

        for tag in &tags {
            self.tags.associate(tag, &key);
        }
    }

    /// Remove one entry and its tag associations
    fn remove(&mut self, key: &str) -> bool {
        match self.entries.delete(key) {
            Some(entry) => {
                for tag in &entry.tags {
                    self.tags.dissociate(tag, key);
                }
                self.counters.invalidations += 1;
                true
            }
            None => false,
        }
    }

    /// Fresh value under `key`, marking it most recently used
    fn lookup_fresh(&mut self, key: &str, ttl: Duration) -> Option<T>
    where
        T: Clone,
    {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(ttl) => Some(entry.data.clone()),
            _ => None,
        }
    }
}

impl<T> QueryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a cache with the default configuration (1000 entries, 5 minute TTL)
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create a cache with the given configuration.
    ///
    /// An invalid configuration is logged and used anyway: a zero
    /// `max_entries` is raised to one entry. Use
    /// [`QueryCache::try_with_config`] to reject it instead.
    pub fn with_config(config: CacheConfig) -> Self {
        if let Err(e) = config.validate() {
            warn!("Query cache created with invalid config: {}", e);
        }

        info!(
            "Initializing query cache (max_entries: {}, default_ttl: {:?}, single_flight: {})",
            config.max_entries, config.default_ttl, config.single_flight
        );

        let state = CacheState {
            entries: EntryStore::new(config.max_entries),
            tags: TagIndex::new(),
            counters: Counters::default(),
        };

        Self {
            config,
            state: RwLock::new(state),
            flights: FlightMap::new(),
        }
    }

    /// Create a cache after checking the configuration
    pub fn try_with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Return the cached value for `key` if it is younger than the TTL,
    /// otherwise run `compute`, cache its result and return it.
    ///
    /// A failing `compute` leaves the cache untouched: nothing is written and
    /// a stale entry under `key` stays where it was. The error is returned
    /// as is.
    pub async fn get<K, F, Fut, E>(&self, key: K, compute: F, options: QueryOptions) -> std::result::Result<T, E>
    where
        K: Into<CacheKey>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        let key = key.into();
        let ttl = options.ttl.unwrap_or(self.config.default_ttl);

        if let Some(value) = self.cached(&key, ttl).await {
            return Ok(value);
        }

        if !self.config.single_flight {
            return self.compute_and_store(key, ttl, options.tags, compute).await;
        }

        let _flight = self.flights.acquire(&key).await;

        // Someone ahead of us in the queue may have filled the entry
        if let Some(value) = self.cached(&key, ttl).await {
            return Ok(value);
        }

        self.compute_and_store(key, ttl, options.tags, compute).await
    }

    async fn cached(&self, key: &str, ttl: Duration) -> Option<T> {
        let mut state = self.state.write().await;
        let value = state.lookup_fresh(key, ttl);
        if value.is_some() {
            state.counters.hits += 1;
            debug!("Cache hit: {}", key);
        }
        value
    }

    async fn compute_and_store<F, Fut, E>(
        &self,
        key: CacheKey,
        ttl: Duration,
        tags: Vec<String>,
        compute: F,
    ) -> std::result::Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        debug!("Cache miss: {}", key);
        self.state.write().await.counters.misses += 1;

        let value = match compute().await {
            Ok(value) => value,
            Err(e) => {
                self.state.write().await.counters.compute_errors += 1;
                warn!("Compute failed for {}; cache left unchanged", key);
                return Err(e);
            }
        };

        let entry = CacheEntry::new(value.clone(), tags, ttl);
        self.state.write().await.insert(key, entry);

        Ok(value)
    }

    /// Stored value under `key`, fresh or stale, without computing or
    /// touching recency
    pub async fn peek(&self, key: &str) -> Option<T> {
        let state = self.state.read().await;
        state.entries.peek(key).map(|entry| entry.data.clone())
    }

    /// Copy of the stored entry under `key`, including its timestamp and tags
    pub async fn peek_entry(&self, key: &str) -> Option<CacheEntry<T>> {
        let state = self.state.read().await;
        state.entries.peek(key).cloned()
    }

    /// Check if a key is stored (fresh or stale)
    pub async fn contains_key(&self, key: &str) -> bool {
        let state = self.state.read().await;
        state.entries.contains(key)
    }

    /// Remove one entry. Unknown keys are a no-op.
    pub async fn invalidate(&self, key: &str) -> bool {
        let mut state = self.state.write().await;
        let removed = state.remove(key);
        if removed {
            debug!("Invalidated cache entry: {} ({})", key, InvalidationReason::Manual);
        }
        removed
    }

    /// Remove every entry carrying `tag`, fresh or stale
    pub async fn invalidate_by_tag(&self, tag: &str) -> usize {
        self.invalidate_tagged(tag).await.len()
    }

    /// Same as [`QueryCache::invalidate_by_tag`], reporting which keys were
    /// removed
    pub async fn invalidate_tagged(&self, tag: &str) -> InvalidationEvent {
        let mut state = self.state.write().await;

        let mut removed = Vec::new();
        for key in state.tags.keys_for_tag(tag) {
            if state.remove(&key) {
                removed.push(key);
            }
        }

        info!("Invalidated {} entries with tag: {}", removed.len(), tag);
        InvalidationEvent::new(
            InvalidationReason::TagMatch {
                tag: tag.to_string(),
            },
            removed,
        )
    }

    /// Remove every entry whose key matches `pattern` (`*` is the only
    /// wildcard). Scans the whole cache.
    pub async fn invalidate_pattern(&self, pattern: &str) -> Result<usize> {
        let event = self.invalidate_matching(&KeyPattern::new(pattern)?).await;
        Ok(event.len())
    }

    /// Same as [`QueryCache::invalidate_pattern`] with a precompiled pattern,
    /// reporting which keys were removed
    pub async fn invalidate_matching(&self, pattern: &KeyPattern) -> InvalidationEvent {
        let mut state = self.state.write().await;

        let matched: Vec<CacheKey> = state
            .entries
            .keys()
            .into_iter()
            .filter(|key| pattern.matches(key))
            .collect();

        for key in &matched {
            state.remove(key);
        }

        info!("Invalidated {} entries matching pattern: {}", matched.len(), pattern.as_str());
        InvalidationEvent::new(
            InvalidationReason::PatternMatch {
                pattern: pattern.as_str().to_string(),
            },
            matched,
        )
    }

    /// Remove entries older than the TTL they were written with
    pub async fn purge_stale(&self) -> InvalidationEvent {
        let mut state = self.state.write().await;

        let expired = state.entries.expired_keys();
        for key in &expired {
            state.remove(key);
        }

        if !expired.is_empty() {
            debug!("Purged {} stale entries", expired.len());
        }

        let context = format!("Purged {} stale entries", expired.len());
        InvalidationEvent::new(InvalidationReason::Expired, expired).with_context(context)
    }

    /// Clear all entries and tags
    pub async fn clear(&self) {
        let mut state = self.state.write().await;

        let count = state.entries.len();
        state.entries.clear();
        state.tags.clear();
        state.counters.invalidations += count as u64;

        info!("Cleared {} entries from cache ({})", count, InvalidationReason::Cleared);
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let state = self.state.read().await;
        CacheStats {
            size: state.entries.len(),
            max_size: state.entries.capacity(),
            tags: state.tags.len(),
            hits: state.counters.hits,
            misses: state.counters.misses,
            evictions: state.counters.evictions,
            invalidations: state.counters.invalidations,
            compute_errors: state.counters.compute_errors,
        }
    }

    /// Get number of entries in cache
    pub async fn len(&self) -> usize {
        let state = self.state.read().await;
        state.entries.len()
    }

    /// Check if cache is empty
    pub async fn is_empty(&self) -> bool {
        let state = self.state.read().await;
        state.entries.is_empty()
    }

    /// Number of keys with a computation in progress
    pub fn in_flight(&self) -> usize {
        self.flights.len()
    }

    /// Start the background sweep that purges stale entries every
    /// `cleanup_interval`. Abort the handle to stop it.
    pub fn spawn_cleanup(cache: Arc<Self>) -> JoinHandle<()> {
        let interval = cache.config.cleanup_interval;
        info!("Starting automatic cache cleanup task (interval: {:?})", interval);

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                let event = cache.purge_stale().await;
                if !event.is_empty() {
                    debug!("Auto cleanup: {} entries", event.len());
                }
            }
        })
    }
}

impl<T> Default for QueryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
