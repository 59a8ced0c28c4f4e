//! Cache Module
//!
//! In-memory cache provider: named, tenant-partitioned caches with TTL
//! expiration and LRU eviction.

mod entry;
mod lru;
mod manager;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use manager::{CacheHandle, CacheProvider, InMemoryCache, InMemoryCacheManager};
pub use stats::CacheStats;
pub use store::CacheStore;
