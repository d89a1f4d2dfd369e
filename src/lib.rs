//! Mini Proxy - a caching HTTP/1.0 forward proxy
//!
//! Relays GET requests to origin servers and keeps small responses in a
//! bounded, recency-ordered in-memory cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod proxy;
pub mod server;

pub use cache::ObjectCache;
pub use config::Config;
pub use error::ProxyError;
