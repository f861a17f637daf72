//! Tag index for group invalidation

use crate::cache::types::CacheKey;
use std::collections::{HashMap, HashSet};

/// Mapping from tag to the set of keys currently stored under it.
///
/// The index does not observe the entry store. Whoever removes an entry from
/// the store must dissociate each of its tags here.
#[derive(Debug, Default)]
pub struct TagIndex {
    tags: HashMap<String, HashSet<CacheKey>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` under `tag`, creating the tag if needed
    pub fn associate(&mut self, tag: &str, key: &str) {
        self.tags
            .entry(tag.to_string())
            .or_default()
            .insert(key.to_string());
    }

    /// Remove `key` from `tag`; the tag disappears once it has no keys
    pub fn dissociate(&mut self, tag: &str, key: &str) {
        if let Some(keys) = self.tags.get_mut(tag) {
            keys.remove(key);
            if keys.is_empty() {
                self.tags.remove(tag);
            }
        }
    }

    /// Snapshot of the keys under `tag`; empty for unknown tags
    pub fn keys_for_tag(&self, tag: &str) -> HashSet<CacheKey> {
        self.tags.get(tag).cloned().unwrap_or_default()
    }

    /// Number of tags with at least one key
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }
}
