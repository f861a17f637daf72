//! Event Portal Cache Demo
//!
//! Wires a query cache into a toy version of the portal: an in-memory event
//! store with artificial latency, read handlers that go through the cache, and
//! write handlers that invalidate by tag.
//!
//! Usage:
//!   cargo run --example event_portal
//!
//! Environment variables (also read from `.env`):
//!   PORTAL_CACHE_MAX_ENTRIES          - entry capacity (default: 1000)
//!   PORTAL_CACHE_DEFAULT_TTL_MS       - default TTL in ms (default: 300000)
//!   PORTAL_CACHE_CLEANUP_INTERVAL_MS  - stale sweep interval in ms (default: 600000)
//!   PORTAL_CACHE_SINGLE_FLIGHT        - true/false (default: true)
//!   RUST_LOG                          - log filter (default: portal_cache=debug,event_portal=info)

use anyhow::Result;
use portal_cache::cache::{event_tag, CacheKeyBuilder, QueryCache, Resource, RevalidationPolicy};
use portal_cache::CacheConfig;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone)]
enum PortalData {
    Events(Vec<String>),
    CheckedIn(u32),
}

/// Stand-in for the document database
#[derive(Default)]
struct EventStore {
    events: RwLock<HashMap<String, (String, u32)>>,
    queries: AtomicU64,
}

impl EventStore {
    async fn list_titles(&self) -> Result<Vec<String>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(40)).await;
        let events = self.events.read().await;
        let mut titles: Vec<String> = events.values().map(|(title, _)| title.clone()).collect();
        titles.sort();
        Ok(titles)
    }

    async fn checked_in(&self, event_id: &str) -> Result<u32> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(40)).await;
        let events = self.events.read().await;
        events
            .get(event_id)
            .map(|(_, count)| *count)
            .ok_or_else(|| anyhow::anyhow!("unknown event {}", event_id))
    }

    async fn check_in(&self, event_id: &str) {
        if let Some((_, count)) = self.events.write().await.get_mut(event_id) {
            *count += 1;
        }
    }
}

/// Handler state: one cache, one store, shared by every request
struct Portal {
    cache: Arc<QueryCache<PortalData>>,
    store: Arc<EventStore>,
}

impl Portal {
    async fn event_titles(&self) -> Result<Vec<String>> {
        let key = CacheKeyBuilder::new(Resource::Events).param("page", 1).build();
        let store = self.store.clone();
        let data = self
            .cache
            .get(
                key,
                || async move { store.list_titles().await.map(PortalData::Events) },
                RevalidationPolicy::EventList.options(),
            )
            .await?;

        match data {
            PortalData::Events(titles) => Ok(titles),
            other => Err(anyhow::anyhow!("unexpected cached payload: {:?}", other)),
        }
    }

    async fn attendance(&self, event_id: &str) -> Result<u32> {
        let key = CacheKeyBuilder::new(Resource::Attendance).identifier(event_id).build();
        let policy = RevalidationPolicy::Attendance {
            event_id: event_id.to_string(),
        };
        let store = self.store.clone();
        let id = event_id.to_string();
        let data = self
            .cache
            .get(
                key,
                || async move { store.checked_in(&id).await.map(PortalData::CheckedIn) },
                policy.options(),
            )
            .await?;

        match data {
            PortalData::CheckedIn(count) => Ok(count),
            other => Err(anyhow::anyhow!("unexpected cached payload: {:?}", other)),
        }
    }

    async fn scan_ticket(&self, event_id: &str) {
        self.store.check_in(event_id).await;
        let event = self.cache.invalidate_tagged(&event_tag(event_id)).await;
        info!("Check-in for {}: dropped {:?} ({})", event_id, event.keys, event.reason);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "portal_cache=debug,event_portal=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("=== Event Portal Cache Demo ===");

    let config = CacheConfig::from_env()?;
    let cache = Arc::new(QueryCache::try_with_config(config)?);
    let cleanup = QueryCache::spawn_cleanup(cache.clone());

    let store = Arc::new(EventStore::default());
    {
        let mut events = store.events.write().await;
        events.insert("42".to_string(), ("Spring Gala".to_string(), 0));
        events.insert("43".to_string(), ("Volunteer Orientation".to_string(), 0));
    }

    let portal = Arc::new(Portal {
        cache: cache.clone(),
        store: store.clone(),
    });

    info!("\n--- Burst of identical listing requests ---");
    let requests: Vec<_> = (0..20)
        .map(|_| {
            let portal = portal.clone();
            tokio::spawn(async move { portal.event_titles().await })
        })
        .collect();
    for request in requests {
        let titles = request.await??;
        assert_eq!(titles.len(), 2);
    }
    info!(
        "20 requests served with {} store queries",
        store.queries.load(Ordering::SeqCst)
    );

    info!("\n--- Check-in invalidates attendance for that event only ---");
    info!("Event 42 checked in: {}", portal.attendance("42").await?);
    info!("Event 43 checked in: {}", portal.attendance("43").await?);
    portal.scan_ticket("42").await;
    info!("Event 42 checked in: {}", portal.attendance("42").await?);
    info!("Event 43 checked in: {}", portal.attendance("43").await?);

    info!("\n--- Admin purge of every attendance read ---");
    let removed = cache.invalidate_pattern("attendance:*").await?;
    info!("Removed {} entries", removed);

    let stats = cache.stats().await;
    info!("{}", stats);
    info!("Stats payload: {}", stats.to_json()?);

    cleanup.abort();
    Ok(())
}
