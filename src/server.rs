//! Connection Dispatcher
//!
//! Accepts client connections and detaches one handler task per
//! connection. There is no pooling or admission control; each task owns
//! its connection and shares only the object cache.

use std::io;

use tokio::net::TcpListener;
use tracing::debug;

use crate::cache::ObjectCache;
use crate::proxy::handle_connection;

// == Run ==
/// Runs the accept loop until the listener fails.
///
/// Every accepted connection gets its own spawned task holding a clone of
/// the cache handle. A task's outcome never affects the loop or any other
/// connection.
pub async fn run(listener: TcpListener, cache: ObjectCache) -> io::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        debug!(%peer, "accepted connection");

        let cache = cache.clone();
        tokio::spawn(async move {
            handle_connection(stream, peer, cache).await;
        });
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MAX_CACHE_SIZE, MAX_OBJECT_SIZE};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn spawn_server() -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let cache = ObjectCache::new(MAX_OBJECT_SIZE, MAX_CACHE_SIZE);
        tokio::spawn(run(listener, cache));
        addr
    }

    #[tokio::test]
    async fn test_garbage_request_line_gets_400() {
        let addr = spawn_server().await;

        let mut client = TcpStream::connect(addr).await.unwrap();
        client.write_all(b"garbage\r\n").await.unwrap();

        let mut response = Vec::new();
        client.read_to_end(&mut response).await.unwrap();
        let response = String::from_utf8_lossy(&response);
        assert!(response.starts_with("HTTP/1.0 400 Bad Request\r\n"));
    }

    #[tokio::test]
    async fn test_connections_are_independent() {
        let addr = spawn_server().await;

        // A client that disappears without sending anything must not
        // affect the next one.
        let silent = TcpStream::connect(addr).await.unwrap();
        drop(silent);

        let mut client = TcpStream::connect(addr).await.unwrap();
        client
            .write_all(b"PUT http://example.com/ HTTP/1.0\r\n\r\n")
            .await
            .unwrap();

        let mut response = Vec::new();
        client.read_to_end(&mut response).await.unwrap();
        let response = String::from_utf8_lossy(&response);
        assert!(response.starts_with("HTTP/1.0 501 Not Implemented\r\n"));
    }
}
