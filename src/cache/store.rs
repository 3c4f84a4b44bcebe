//! Cache Store Module
//!
//! Unsynchronized storage engine behind the shared [`Cache`](super::Cache)
//! handle. Every method here runs while the caller holds the cache lock.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key-value storage of opaque response bodies keyed by request URL.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Activity counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty CacheStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Put ==
    /// Stores `value` under `key`, stamping the current instant.
    ///
    /// An existing entry for the key is replaced along with its creation time.
    pub fn put(&mut self, key: String, value: Vec<u8>) {
        self.entries.insert(key, CacheEntry::new(value));
        self.stats.record_write();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns a copy of the bytes stored under `key`, if any.
    ///
    /// Age is not checked here: an entry is visible until the reaper removes it.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Reap Expired ==
    /// Removes every entry older than `max_age` at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn reap_expired(&mut self, now: Instant, max_age: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(now, max_age));
        let removed = before - self.entries.len();

        self.stats.record_sweep(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
