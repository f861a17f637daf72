//! # portal-cache
//!
//! Query result caching for the event registration and attendance portal.
//!
//! Route handlers for event sign-up, QR check-in and admin reporting read
//! from a document store. This crate puts a bounded, tag-aware cache in front
//! of those reads:
//!
//! - Get-or-compute with a per-call time-to-live
//! - Least-recently-used eviction at a fixed capacity (default 1000 entries)
//! - Group invalidation by tag and administrative invalidation by key pattern
//! - Single-flight de-duplication so a burst of identical misses hits the
//!   store once
//! - Per-route revalidation policies and a key builder for portal resources
//!
//! ## Usage
//!
//! Build one cache at startup and share it with handlers:
//!
//! ```no_run
//! use portal_cache::{CacheConfig, QueryCache, RevalidationPolicy};
//! use std::sync::Arc;
//!
//! #[derive(Clone)]
//! struct Attendance {
//!     checked_in: u32,
//! }
//!
//! async fn load_attendance(event_id: &str) -> anyhow::Result<Attendance> {
//!     // document store query goes here
//!     Ok(Attendance { checked_in: 0 })
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = Arc::new(QueryCache::with_config(CacheConfig::from_env()?));
//!
//!     let policy = RevalidationPolicy::Attendance { event_id: "42".to_string() };
//!     let attendance = cache
//!         .get("attendance:42", || load_attendance("42"), policy.options())
//!         .await?;
//!     println!("checked in: {}", attendance.checked_in);
//!
//!     // A check-in was recorded
//!     cache.invalidate_by_tag("event:42").await;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;

// Re-export main types for convenience
pub use cache::{
    CacheConfig, CacheConfigBuilder, CacheEntry, CacheKey, CacheKeyBuilder, CacheStats,
    InvalidationEvent, InvalidationReason, KeyPattern, QueryCache, QueryOptions, Resource,
    RevalidationPolicy,
};
pub use error::{CacheError, Result};
