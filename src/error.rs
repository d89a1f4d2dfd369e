//! Error types for the proxy
//!
//! Provides unified per-connection error handling using thiserror.

use std::io;

use thiserror::Error;

// == Proxy Error Enum ==
/// Errors raised while serving a single client connection.
///
/// No variant ever crosses a connection boundary; each one is resolved
/// where the connection is handled.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The request line could not be parsed into method, target and version
    #[error("malformed request line: {0:?}")]
    MalformedRequest(String),

    /// The client asked for a method other than GET
    #[error("method not implemented: {0}")]
    UnsupportedMethod(String),

    /// The outbound connection to the origin server failed
    #[error("could not connect to {host}:{port}: {source}")]
    OriginConnect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// I/O failure while relaying bytes; the connection is simply dropped
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ProxyError {
    // == Status Mapping ==
    /// Maps the error to the synthetic response it produces, if any.
    ///
    /// Mid-stream I/O failures return None: the client may already hold a
    /// partial body, so no synthetic response is sent and the connection
    /// is closed as-is.
    pub fn status(&self) -> Option<(u16, &'static str, String)> {
        match self {
            ProxyError::MalformedRequest(line) => Some((
                400,
                "Bad Request",
                format!("Proxy could not parse the request: {line}"),
            )),
            ProxyError::UnsupportedMethod(method) => Some((
                501,
                "Not Implemented",
                format!("Proxy does not implement this method: {method}"),
            )),
            ProxyError::OriginConnect { host, port, .. } => Some((
                502,
                "Bad Gateway",
                format!("Proxy could not connect to the origin server at {host}:{port}"),
            )),
            ProxyError::Io(_) => None,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for connection handling.
pub type Result<T> = std::result::Result<T, ProxyError>;
