//! Synthetic Response Module
//!
//! Formats the proxy's own error responses. Everything else a client
//! receives is relayed from an origin byte-for-byte.

use tokio::io::{self, AsyncWrite, AsyncWriteExt};

// == Error Page ==
/// Builds a complete synthetic HTTP/1.0 error response.
///
/// The shape is fixed: status line, `Content-type: text/html`, a correct
/// `Content-length`, blank line, then a small HTML body naming the code,
/// reason and detail.
pub fn error_page(code: u16, reason: &str, detail: &str) -> Vec<u8> {
    let body = format!(
        "<html><title>Proxy Error</title><body>{code}: {reason}<br>{detail}<br></body></html>"
    );

    let mut response = format!(
        "HTTP/1.0 {code} {reason}\r\nContent-type: text/html\r\nContent-length: {}\r\n\r\n",
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(body.as_bytes());
    response
}

// == Write Error ==
/// Writes a synthetic error response to the client.
pub async fn write_error<W>(writer: &mut W, code: u16, reason: &str, detail: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&error_page(code, reason, detail)).await
}
