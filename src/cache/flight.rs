//! Per-key single-flight gates
//!
//! Concurrent misses on the same key queue on one gate. Whoever holds the
//! gate computes; the rest wait and then re-check the cache. A gate is
//! dropped from the map as soon as nobody holds or waits on it, on every exit
//! path including errors and cancelled futures.

use crate::cache::types::CacheKey;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as GateLock, OwnedMutexGuard};

type Gate = Arc<GateLock<()>>;

#[derive(Debug, Default)]
pub(crate) struct FlightMap {
    gates: Mutex<HashMap<CacheKey, Gate>>,
}

impl FlightMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Wait until this caller is the only one working on `key`
    pub(crate) async fn acquire(&self, key: &str) -> FlightGuard<'_> {
        let gate = self
            .gates
            .lock()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(GateLock::new(())))
            .clone();
        let slot = FlightSlot {
            map: self,
            key: key.to_string(),
            gate: Some(gate.clone()),
        };

        // `slot` cleans up the map entry if this future is dropped here
        let permit = gate.lock_owned().await;

        FlightGuard {
            _permit: permit,
            _slot: slot,
        }
    }

    /// Number of keys with a computation running or queued
    pub(crate) fn len(&self) -> usize {
        self.gates.lock().len()
    }
}

/// Held for the duration of one computation.
///
/// Field order matters: the permit is released before the slot checks
/// whether the gate can be dropped.
pub(crate) struct FlightGuard<'a> {
    _permit: OwnedMutexGuard<()>,
    _slot: FlightSlot<'a>,
}

struct FlightSlot<'a> {
    map: &'a FlightMap,
    key: CacheKey,
    gate: Option<Gate>,
}

impl Drop for FlightSlot<'_> {
    fn drop(&mut self) {
        let mut gates = self.map.gates.lock();
        let Some(gate) = self.gate.take() else {
            return;
        };

        // One reference in the map, one here; anything more is a waiter.
        let last = Arc::strong_count(&gate) == 2
            && gates
                .get(&self.key)
                .is_some_and(|current| Arc::ptr_eq(current, &gate));
        if last {
            gates.remove(&self.key);
        }

        // Released under the map lock so a concurrent slot sees the new count
        drop(gate);
    }
}
