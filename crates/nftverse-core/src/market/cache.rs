//! Keyed query cache with staleness and eviction windows
//!
//! An entry younger than the staleness window is reused as-is by a fresh
//! mount. An older one is still served, but the caller is expected to
//! refetch. Past the eviction window the entry is gone.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::config::CacheConfig;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

/// Result of a cache lookup
#[derive(Debug, PartialEq)]
pub enum CacheLookup<'a, V> {
    /// Within the staleness window
    Fresh(&'a V),
    /// Past staleness but not yet evicted
    Stale(&'a V),
    Miss,
}

impl<'a, V> CacheLookup<'a, V> {
    pub fn value(&self) -> Option<&'a V> {
        match self {
            CacheLookup::Fresh(v) | CacheLookup::Stale(v) => Some(v),
            CacheLookup::Miss => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    stale_after: Duration,
    evict_after: Duration,
}

impl<K: Eq + Hash, V> QueryCache<K, V> {
    pub fn new(stale_after: Duration, evict_after: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stale_after,
            evict_after: evict_after.max(stale_after),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.stale_after(), config.evict_after())
    }

    /// Look up `key` as of `now`
    pub fn lookup(&self, key: &K, now: Instant) -> CacheLookup<'_, V> {
        match self.entries.get(key) {
            Some(entry) => {
                let age = now.saturating_duration_since(entry.fetched_at);
                if age < self.stale_after {
                    CacheLookup::Fresh(&entry.value)
                } else if age < self.evict_after {
                    CacheLookup::Stale(&entry.value)
                } else {
                    CacheLookup::Miss
                }
            }
            None => CacheLookup::Miss,
        }
    }

    /// Store `value` as fetched at `fetched_at`, replacing any previous entry
    pub fn insert(&mut self, key: K, value: V, fetched_at: Instant) {
        self.entries.insert(key, CacheEntry { value, fetched_at });
    }

    /// When the entry under `key` was fetched, evicted or not
    pub fn fetched_at(&self, key: &K) -> Option<Instant> {
        self.entries.get(key).map(|entry| entry.fetched_at)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|entry| entry.value)
    }

    /// Drop every entry past the eviction window. Returns how many were dropped.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let evict_after = self.evict_after;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.fetched_at) < evict_after);
        let purged = before - self.entries.len();
        if purged > 0 {
            tracing::debug!(purged, "Evicted expired query cache entries");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
