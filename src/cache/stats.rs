//! Cache Statistics Module
//!
//! Tracks lookup outcomes, recorded answers and FIFO evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups that returned a match above the threshold
    pub hits: u64,
    /// Lookups that returned no match
    pub misses: u64,
    /// Entries inserted since startup
    pub records: u64,
    /// Entries removed by FIFO eviction
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_insert(&mut self) {
        self.records += 1;
    }

    /// Adds `count` evicted entries.
    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.records, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_lookups() {
        assert_eq!(CacheStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_miss();
        stats.record_hit();
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_record_evictions_accumulates() {
        let mut stats = CacheStats::new();
        stats.record_evictions(2);
        stats.record_evictions(0);
        stats.record_evictions(3);
        assert_eq!(stats.evictions, 5);
    }
}
