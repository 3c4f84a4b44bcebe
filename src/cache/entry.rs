//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with their creation time.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cached response body and when it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored bytes, opaque to the cache
    pub value: Vec<u8>,
    /// Creation instant, taken from the monotonic clock
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Is Stale ==
    /// Checks whether the entry is older than `max_age` at `now`.
    ///
    /// Boundary condition: an entry is stale only when `created_at + max_age`
    /// is strictly before `now`. An entry exactly `max_age` old survives.
    pub fn is_stale(&self, now: Instant, max_age: Duration) -> bool {
        self.age(now) > max_age
    }

    // == Age ==
    /// Returns how long ago the entry was stored, saturating at zero.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }
}
