//! Mini Proxy - a caching HTTP/1.0 forward proxy
//!
//! Relays GET requests to origin servers and keeps small responses in a
//! bounded, recency-ordered in-memory cache.

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_proxy::{server, Config, ObjectCache};

/// Main entry point for the proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Parse and validate the command line configuration
/// 3. Create the shared object cache
/// 4. Bind the listening socket on the configured port
/// 5. Run the accept loop until SIGINT/SIGTERM
/// 6. Log final cache statistics on shutdown
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_proxy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mini Proxy");

    let config = Config::parse();
    config.validate().map_err(anyhow::Error::msg)?;
    info!(
        "Configuration loaded: port={}, max_object_size={}, max_cache_size={}",
        config.port, config.max_object_size, config.max_cache_size
    );

    let cache = ObjectCache::new(config.max_object_size, config.max_cache_size);
    info!("Object cache initialized");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Proxy listening on {}", addr);

    tokio::select! {
        result = server::run(listener, cache.clone()) => {
            result.context("accept loop failed")?;
        }
        _ = shutdown_signal() => {}
    }

    let stats = cache.stats().await;
    info!(
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        entries = stats.entries,
        bytes = stats.bytes,
        "Server shutdown complete"
    );

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
