//! # Query Result Cache
//!
//! A tag-aware, time-bound cache that sits in front of the portal's document
//! store reads (event listings, attendance, orders, admin reports).
//!
//! ## Features
//!
//! - **Get-or-compute**: callers hand over a key, an async compute function and
//!   per-call options; the cache answers from a fresh entry or runs the compute
//! - **TTL checked on read**: each call decides how old an entry may be
//! - **LRU Eviction**: fixed entry capacity, least recently used goes first
//! - **Tag Invalidation**: drop every entry in a group in one call
//! - **Pattern Invalidation**: `*` globs over keys for administrative purges
//! - **Single-flight**: concurrent misses on one key share one computation
//!
//! ## Example
//!
//! ```rust
//! use portal_cache::cache::{CacheConfig, QueryCache, QueryOptions};
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let cache: QueryCache<Vec<String>> = QueryCache::with_config(
//!     CacheConfig::builder().max_entries(500).build(),
//! );
//!
//! let titles = cache
//!     .get(
//!         "events?page=1",
//!         || async { Ok::<_, anyhow::Error>(vec!["Spring Gala".to_string()]) },
//!         QueryOptions::new().ttl(Duration::from_secs(60)).tag("events"),
//!     )
//!     .await?;
//! assert_eq!(titles.len(), 1);
//!
//! // An event was edited: drop every listing
//! cache.invalidate_by_tag("events").await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod entry;
mod flight;
pub mod invalidation;
pub mod keys;
pub mod pattern;
pub mod policy;
pub mod query;
pub mod store;
pub mod tags;
pub mod types;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use entry::CacheEntry;
pub use invalidation::{InvalidationEvent, InvalidationReason};
pub use keys::{CacheKeyBuilder, Resource};
pub use pattern::KeyPattern;
pub use policy::{event_tag, user_tag, QueryOptions, RevalidationPolicy};
pub use query::QueryCache;
pub use store::EntryStore;
pub use tags::TagIndex;
pub use types::{CacheKey, CacheStats};
