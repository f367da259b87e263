//! Cache Store Module
//!
//! Ordered, size-bounded entry collection with FIFO eviction.

use std::collections::VecDeque;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, PersistedCache};
use crate::error::Result;

// == Cache Store ==
/// Entries in insertion order, oldest at the front.
///
/// Never holds more than `max_capacity` entries once an operation returns.
/// Eviction is strict FIFO: reads do not refresh an entry.
#[derive(Debug)]
pub struct CacheStore {
    /// Entries, oldest first
    entries: VecDeque<CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed (at least 1)
    max_capacity: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store. A capacity of 0 is raised to 1.
    pub fn new(max_capacity: usize) -> Self {
        let max_capacity = max_capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(max_capacity),
            stats: CacheStats::new(),
            max_capacity,
        }
    }

    // == Load ==
    /// Rebuilds a store from a persisted record.
    ///
    /// An absent or empty record yields an empty store. A record longer than
    /// `max_capacity` keeps only its most recent entries, in order. Every
    /// entry must have `dimension` components.
    pub fn load(
        persisted: Option<PersistedCache>,
        max_capacity: usize,
        dimension: usize,
    ) -> Result<Self> {
        let mut store = Self::new(max_capacity);
        let Some(record) = persisted else {
            return Ok(store);
        };

        for entry in &record.cache {
            entry.embedding().ensure_dimension(dimension)?;
        }

        let skip = record.cache.len().saturating_sub(store.max_capacity);
        if skip > 0 {
            debug!(
                "Persisted cache holds {} entries, keeping the newest {}",
                record.cache.len(),
                store.max_capacity
            );
        }

        store.entries.extend(record.cache.into_iter().skip(skip));
        store.stats.set_total_entries(store.entries.len());
        Ok(store)
    }

    // == Insert ==
    /// Appends an entry, evicting the oldest entries to make room.
    ///
    /// When the store is full it is trimmed to the newest
    /// `max_capacity - 1` entries before the append, so the new entry always
    /// fits. Returns the number of evicted entries.
    pub fn insert(&mut self, entry: CacheEntry) -> usize {
        let keep = self.max_capacity - 1;
        let evicted = self.entries.len().saturating_sub(keep);

        if evicted > 0 {
            self.entries.drain(..evicted);
            self.stats.record_evictions(evicted);
        }

        self.entries.push_back(entry);
        self.stats.record_insert();
        self.stats.set_total_entries(self.entries.len());
        evicted
    }

    // == All ==
    /// Read-only iterator over the entries in insertion order.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &CacheEntry> + DoubleEndedIterator + '_ {
        self.entries.iter()
    }

    // == Snapshot ==
    /// Builds the persisted record from the current view.
    pub fn snapshot(&self) -> PersistedCache {
        PersistedCache::new(self.entries.iter().cloned().collect())
    }

    // == Clear ==
    /// Removes every entry. Counters other than the entry count are kept.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.set_total_entries(0);
        removed
    }

    // == Stats ==
    /// Counts the outcome of one lookup.
    pub fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the current number of entries.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_capacity
    }
}
