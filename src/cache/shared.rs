//! Shared Cache Handle
//!
//! Thread-safe lookaside cache: one store behind one lock, plus the reaper
//! that keeps it bounded by age.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{PokedexError, Result};
use crate::tasks::{spawn_reaper, ReaperHandle};

/// Longest accepted cache interval (one year)
pub const MAX_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug)]
struct Inner {
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    reaper: Mutex<Option<ReaperHandle>>,
}

// == Cache ==
/// Expiring response cache keyed by request URL.
///
/// Clones share the same store. Values are opaque bytes; the cache never
/// looks inside them. Entries are removed only by the background reaper,
/// once they are older than the cache interval.
#[derive(Debug, Clone)]
pub struct Cache {
    inner: Arc<Inner>,
}

impl Cache {
    /// Creates an empty cache and starts its reaper.
    ///
    /// `interval` is both how often the reaper wakes and how old an entry
    /// must be before it is removed. Must be called inside a Tokio runtime.
    ///
    /// # Errors
    /// Returns [`PokedexError::InvalidInterval`] if `interval` is zero or
    /// longer than [`MAX_INTERVAL`].
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() || interval > MAX_INTERVAL {
            return Err(PokedexError::InvalidInterval);
        }

        let store = Arc::new(Mutex::new(CacheStore::new()));
        let reaper = spawn_reaper(store.clone(), interval);
        debug!("Response cache created with interval {:?}", interval);

        Ok(Self {
            inner: Arc::new(Inner {
                store,
                interval,
                reaper: Mutex::new(Some(reaper)),
            }),
        })
    }

    // == Get ==
    /// Returns the bytes stored under `key`, or `None` if absent.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let value = self.inner.store.lock().await.get(key);
        trace!(key, hit = value.is_some(), "Cache lookup");
        value
    }

    // == Put ==
    /// Inserts or replaces the entry for `key`, stamped with the current time.
    pub async fn put(&self, key: impl Into<String>, value: Vec<u8>) {
        let key = key.into();
        trace!(key = %key, bytes = value.len(), "Cache write");
        self.inner.store.lock().await.put(key, value);
    }

    /// Reaper wake period and entry max age.
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    pub async fn len(&self) -> usize {
        self.inner.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.store.lock().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.store.lock().await.stats()
    }

    // == Stop Reaper ==
    /// Stops the background reaper and waits for it to exit.
    ///
    /// Entries stay readable and writable afterwards but no longer expire.
    /// Returns false if the reaper was already stopped.
    pub async fn stop_reaper(&self) -> bool {
        let handle = self.inner.reaper.lock().await.take();
        match handle {
            Some(handle) => {
                handle.stop().await;
                debug!("Response cache reaper stopped");
                true
            }
            None => false,
        }
    }
}
