//! Cache Statistics Module
//!
//! Tracks cache performance counters: hits, misses and evictions.

use std::sync::atomic::{AtomicU64, Ordering};

// == Cache Stats ==
/// Lock-free performance counters for the cache.
///
/// Hits are recorded while holding only the cache's shared lock, so the
/// counters are atomics rather than plain integers behind `&mut self`.
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Lookups that found a valid entry
    hits: AtomicU64,
    /// Lookups that found nothing
    misses: AtomicU64,
    /// Entries removed to make room for an insert
    evictions: AtomicU64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new counter set with all values at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Captures the counters together with the cache's current occupancy.
    pub fn snapshot(&self, entries: usize, bytes: usize) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries,
            bytes,
        }
    }
}

// == Stats Snapshot ==
/// A point-in-time copy of the cache counters and occupancy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Number of successful cache lookups
    pub hits: u64,
    /// Number of failed cache lookups
    pub misses: u64,
    /// Number of entries evicted by the LRU policy
    pub evictions: u64,
    /// Current number of entries in the cache
    pub entries: usize,
    /// Current total of stored payload bytes
    pub bytes: usize,
}

impl StatsSnapshot {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
