//! Configuration Module
//!
//! Startup configuration: the listen port plus the two cache bounds.

use clap::Parser;

use crate::cache::{MAX_CACHE_SIZE, MAX_OBJECT_SIZE};

// == Config ==
/// Proxy configuration, parsed from the command line.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mini_proxy",
    about = "A caching HTTP/1.0 forward proxy with LRU eviction"
)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// Largest response eligible for caching, in bytes
    #[arg(long, default_value_t = MAX_OBJECT_SIZE)]
    pub max_object_size: usize,

    /// Total cache capacity, in bytes
    #[arg(long, default_value_t = MAX_CACHE_SIZE)]
    pub max_cache_size: usize,
}

impl Config {
    // == Validate ==
    /// Checks the relationship between the two cache bounds.
    ///
    /// Eviction relies on any admissible object fitting into an emptied
    /// cache, which requires the per-object bound to stay at or below the
    /// total capacity.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_object_size > self.max_cache_size {
            return Err(format!(
                "max-object-size ({}) must not exceed max-cache-size ({})",
                self.max_object_size, self.max_cache_size
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            max_object_size: MAX_OBJECT_SIZE,
            max_cache_size: MAX_CACHE_SIZE,
        }
    }
}
