//! Cache Module
//!
//! Semantic cache core: embedding vectors, immutable entries, the FIFO-bounded
//! store, similarity search and the persisted record shape.

mod entry;
mod persistence;
mod search;
mod stats;
mod store;
mod vector;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use persistence::{CacheStorage, JsonFileStorage, MemoryStorage, PersistedCache};
pub use search::{find_best_match, SearchMatch};
pub use stats::CacheStats;
pub use store::CacheStore;
pub use vector::{similarity, EmbeddingVector};
