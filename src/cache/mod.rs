//! Cache Module
//!
//! Provides the in-memory response cache with age-based expiry.

mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use shared::{Cache, MAX_INTERVAL};
pub use stats::CacheStats;
pub use store::CacheStore;
