//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with byte-budgeted LRU
//! eviction, plus the shared handle used by concurrent connections.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker, StatsSnapshot};

// == Cache Store ==
/// URI-keyed storage for origin responses with LRU eviction.
///
/// Capacity is counted in payload bytes, not entries: the sum of all stored
/// payload sizes never exceeds `max_cache_size` between operations, and no
/// single payload larger than `max_object_size` is ever admitted.
#[derive(Debug)]
pub struct CacheStore {
    /// URI to cached response mapping
    entries: HashMap<String, CacheEntry>,
    /// Recency order for eviction
    lru: LruTracker,
    /// Performance counters
    stats: CacheStats,
    /// Running total of stored payload bytes
    total_bytes: usize,
    /// Largest single payload eligible for caching
    max_object_size: usize,
    /// Aggregate payload capacity
    max_cache_size: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given size bounds.
    ///
    /// # Arguments
    /// * `max_object_size` - Largest payload, in bytes, eligible for caching
    /// * `max_cache_size` - Total payload capacity in bytes
    pub fn new(max_object_size: usize, max_cache_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            total_bytes: 0,
            max_object_size,
            max_cache_size,
        }
    }

    // == Peek ==
    /// Looks up a URI and copies the payload out without touching the
    /// recency order.
    ///
    /// Takes `&self` so callers can hold the shared lock, letting lookups
    /// from different connections proceed in parallel. Recording the
    /// promotion is the caller's job, under the exclusive lock.
    pub fn peek(&self, uri: &str) -> Option<Bytes> {
        match self.entries.get(uri) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.body())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Promote ==
    /// Moves an existing entry to the most-recent position.
    ///
    /// A URI that is no longer present (evicted between a peek and this
    /// call) is left alone; promotion is best-effort.
    pub fn promote(&mut self, uri: &str) {
        if self.entries.contains_key(uri) {
            self.lru.touch(uri);
        }
    }

    // == Insert ==
    /// Stores a fully accumulated response under its request URI.
    ///
    /// Oversized payloads are rejected without error. If the URI is already
    /// present (another connection fetched it concurrently) the new payload
    /// is discarded and the existing entry promoted instead. Otherwise the
    /// least recently used entries are evicted until the payload fits, and
    /// the new entry becomes most recent.
    pub fn insert(&mut self, uri: String, body: Bytes) {
        if body.len() > self.max_object_size {
            debug!(
                uri = %uri,
                size = body.len(),
                "response too large to cache"
            );
            return;
        }

        if self.entries.contains_key(&uri) {
            // Lost the fill race to another connection. Keep its copy.
            self.lru.touch(&uri);
            return;
        }

        while !self.entries.is_empty() && self.total_bytes + body.len() > self.max_cache_size {
            let Some(victim) = self.lru.pop_lru() else {
                break;
            };
            if let Some(evicted) = self.entries.remove(&victim) {
                self.total_bytes -= evicted.size();
                self.stats.record_eviction();
                debug!(uri = %victim, size = evicted.size(), "evicted cache entry");
            }
        }

        self.total_bytes += body.len();
        self.lru.touch(&uri);
        self.entries.insert(uri, CacheEntry::new(body));
    }

    // == Stats ==
    /// Returns a snapshot of the counters and current occupancy.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot(self.entries.len(), self.total_bytes)
    }

    // == Contains ==
    /// Checks whether a URI currently has an entry.
    pub fn contains(&self, uri: &str) -> bool {
        self.entries.contains_key(uri)
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Total Bytes ==
    /// Returns the running total of stored payload bytes.
    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }
}

// == Object Cache ==
/// Shared, thread-safe handle to the cache, cloned into every connection
/// task.
///
/// Lookups take the shared lock to copy the payload out, release it, then
/// take the exclusive lock to promote the entry. Because those are two
/// separate critical sections, a concurrent insert may evict the entry in
/// between; the promotion then silently does nothing while the copied
/// payload stays valid.
#[derive(Debug, Clone)]
pub struct ObjectCache {
    inner: Arc<RwLock<CacheStore>>,
    max_object_size: usize,
}

impl ObjectCache {
    // == Constructor ==
    /// Creates a new cache with the given size bounds.
    pub fn new(max_object_size: usize, max_cache_size: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheStore::new(max_object_size, max_cache_size))),
            max_object_size,
        }
    }

    // == Max Object Size ==
    /// Returns the largest payload size eligible for caching.
    ///
    /// Handlers consult this while streaming to decide when to stop
    /// accumulating a response.
    pub fn max_object_size(&self) -> usize {
        self.max_object_size
    }

    // == Lookup ==
    /// Returns the cached response for a URI, promoting the entry to most
    /// recent on a hit.
    pub async fn lookup(&self, uri: &str) -> Option<Bytes> {
        let body = {
            let store = self.inner.read().await;
            store.peek(uri)
        }?;

        // Promotion is best-effort: the entry may already be gone.
        let mut store = self.inner.write().await;
        store.promote(uri);
        Some(body)
    }

    // == Store ==
    /// Inserts a fully accumulated response, evicting as needed.
    pub async fn store(&self, uri: String, body: Bytes) {
        let mut store = self.inner.write().await;
        store.insert(uri, body);
    }

    // == Stats ==
    /// Returns a snapshot of the counters and current occupancy.
    pub async fn stats(&self) -> StatsSnapshot {
        let store = self.inner.read().await;
        store.stats()
    }
}
