//! Request Handler Module
//!
//! Drives one client connection through its whole lifecycle: read and
//! validate the request line, try the cache, otherwise fetch from the
//! origin while streaming bytes back to the client, then maybe store the
//! accumulated object.

use std::io;
use std::net::SocketAddr;

use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::cache::ObjectCache;
use crate::error::{ProxyError, Result};
use crate::proxy::line::read_line_bounded;
use crate::proxy::request::{build_request, MAX_HEADER_LINE};
use crate::proxy::response::write_error;
use crate::proxy::uri::parse_uri;

// == Constants ==
/// Relay chunk size for origin responses, in bytes
const CHUNK_SIZE: usize = 8192;

// == Handle Connection ==
/// Serves one accepted client connection to completion.
///
/// Request-level failures (bad request line, unsupported method, origin
/// unreachable) turn into synthetic error responses. I/O failures while
/// relaying close the connection silently, since the client may already
/// hold part of a response. Nothing here escapes to other connections.
pub async fn handle_connection(mut stream: TcpStream, peer: SocketAddr, cache: ObjectCache) {
    match serve(&mut stream, &cache).await {
        Ok(()) => {}
        Err(error) => {
            if let Some((code, reason, detail)) = error.status() {
                debug!(%peer, code, %error, "rejecting request");
                if let Err(error) = write_error(&mut stream, code, reason, &detail).await {
                    debug!(%peer, %error, "failed to deliver error response");
                }
            } else {
                debug!(%peer, %error, "connection aborted mid-stream");
            }
        }
    }
}

// == Serve ==
/// The per-connection state machine.
async fn serve(stream: &mut TcpStream, cache: &ObjectCache) -> Result<()> {
    let (read_half, mut client) = stream.split();
    let mut reader = BufReader::new(read_half);

    // -- Read request line --
    let request_line = match read_line_bounded(&mut reader, MAX_HEADER_LINE).await {
        Ok(Some(line)) => line,
        // Client connected and left without asking for anything.
        Ok(None) => return Ok(()),
        Err(error) if error.kind() == io::ErrorKind::InvalidData => {
            return Err(ProxyError::MalformedRequest(
                "request line too long".to_string(),
            ))
        }
        Err(error) => return Err(error.into()),
    };

    // -- Validate method --
    let (method, uri) = parse_request_line(&request_line)?;
    if !method.eq_ignore_ascii_case("GET") {
        return Err(ProxyError::UnsupportedMethod(method.to_string()));
    }

    // -- Cache lookup --
    if let Some(cached) = cache.lookup(uri).await {
        client.write_all(&cached).await?;
        debug!(uri, bytes = cached.len(), "served from cache");
        return Ok(());
    }

    // -- Resolve and connect --
    let target = parse_uri(uri);
    let request = build_request(&mut reader, &target).await?;

    let mut origin = TcpStream::connect((target.host.as_str(), target.port))
        .await
        .map_err(|source| {
            warn!(host = %target.host, port = target.port, error = %source, "origin connect failed");
            ProxyError::OriginConnect {
                host: target.host.clone(),
                port: target.port,
                source,
            }
        })?;
    origin.write_all(&request).await?;

    // -- Stream response --
    // Relay in bounded chunks, accumulating a copy for the cache until
    // the response outgrows the per-object bound. Once it does,
    // accumulation stays off for the rest of this response.
    let max_object_size = cache.max_object_size();
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut object = Vec::new();
    let mut relayed = 0usize;
    let mut oversized = false;

    loop {
        let read = origin.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        client.write_all(&chunk[..read]).await?;
        relayed += read;
        if !oversized {
            if relayed <= max_object_size {
                object.extend_from_slice(&chunk[..read]);
            } else {
                oversized = true;
                object = Vec::new();
            }
        }
    }

    // -- Maybe store --
    if !oversized && relayed > 0 {
        debug!(uri, bytes = relayed, "caching origin response");
        cache.store(uri.to_string(), Bytes::from(object)).await;
    } else {
        debug!(uri, bytes = relayed, oversized, "relayed without caching");
    }

    Ok(())
}

// == Parse Request Line ==
/// Splits a request line into method and target, requiring the
/// three-token `METHOD TARGET VERSION` shape.
fn parse_request_line(line: &str) -> Result<(&str, &str)> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(target), Some(_version), None) => Ok((method, target)),
        _ => Err(ProxyError::MalformedRequest(line.to_string())),
    }
}
