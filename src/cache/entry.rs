//! Cache Entry Module
//!
//! Defines the structure for individual cached response objects.

use bytes::Bytes;

// == Cache Entry ==
/// A single cached origin response, immutable once created.
///
/// The payload is the origin's complete response byte stream (status line,
/// headers and body) exactly as it was relayed to the client. An entry is
/// never mutated in place; a refreshed object replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored response bytes
    body: Bytes,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry from a fully accumulated response.
    pub fn new(body: Bytes) -> Self {
        Self { body }
    }

    // == Body ==
    /// Returns a handle to the stored bytes.
    ///
    /// `Bytes` clones are reference counted, so this is cheap enough to
    /// call while holding the cache's shared lock.
    pub fn body(&self) -> Bytes {
        self.body.clone()
    }

    // == Size ==
    /// Returns the payload length in bytes.
    pub fn size(&self) -> usize {
        self.body.len()
    }
}
