//! Header Rewriter Module
//!
//! Builds the outbound origin request: the proxy's own request line and
//! identity headers, followed by the client's remaining headers minus the
//! proxy-controlled set.

use tokio::io::{self, AsyncBufRead};

use crate::proxy::line::read_line_bounded;
use crate::proxy::uri::{RequestTarget, HTTP_PORT};

// == Constants ==
/// Header names the proxy always supplies itself. Client versions of
/// these are dropped, whatever their spelling.
pub const PROXY_CONTROLLED_HEADERS: [&str; 4] =
    ["Host", "User-Agent", "Connection", "Proxy-Connection"];

/// Fixed proxy identity sent to origins
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Longest accepted request or header line, in bytes
pub(crate) const MAX_HEADER_LINE: usize = 8192;

/// Budget for the forwarded client header section, in bytes
const MAX_FORWARDED_HEADERS: usize = 65536;

// == Exclusion Check ==
/// Checks a header name against the proxy-controlled set,
/// case-insensitively.
fn is_proxy_controlled(name: &str) -> bool {
    PROXY_CONTROLLED_HEADERS
        .iter()
        .any(|controlled| controlled.eq_ignore_ascii_case(name))
}

// == Build Request ==
/// Produces the complete outbound request byte buffer for an origin.
///
/// The reader must be positioned immediately after the client's request
/// line. Client headers are consumed up to the empty terminator line (or
/// end-of-stream) and forwarded verbatim in their original order, except
/// the proxy-controlled names. Forwarding is budgeted: once the section
/// budget is spent, or a single line overflows the line bound, the rest
/// of the client's headers are dropped rather than failing the request.
pub async fn build_request<R>(reader: &mut R, target: &RequestTarget) -> io::Result<Vec<u8>>
where
    R: AsyncBufRead + Unpin,
{
    let mut request = Vec::with_capacity(512);

    request.extend_from_slice(format!("GET {} HTTP/1.0\r\n", target.path).as_bytes());
    if target.port == HTTP_PORT {
        request.extend_from_slice(format!("Host: {}\r\n", target.host).as_bytes());
    } else {
        request.extend_from_slice(format!("Host: {}:{}\r\n", target.host, target.port).as_bytes());
    }
    request.extend_from_slice(format!("User-Agent: {USER_AGENT}\r\n").as_bytes());
    request.extend_from_slice(b"Connection: close\r\n");
    request.extend_from_slice(b"Proxy-Connection: close\r\n");

    let mut forwarded = 0usize;
    loop {
        let header = match read_line_bounded(reader, MAX_HEADER_LINE).await {
            Ok(Some(line)) => line,
            // Stream ended before the terminator; treat it as the end of
            // the header section.
            Ok(None) => break,
            // Unreadable overlong line; drop it and everything after it.
            Err(error) if error.kind() == io::ErrorKind::InvalidData => break,
            Err(error) => return Err(error),
        };
        if header.is_empty() {
            break;
        }

        let name = header.split(':').next().unwrap_or("").trim();
        if is_proxy_controlled(name) {
            continue;
        }

        if forwarded + header.len() + 2 > MAX_FORWARDED_HEADERS {
            break;
        }
        forwarded += header.len() + 2;
        request.extend_from_slice(header.as_bytes());
        request.extend_from_slice(b"\r\n");
    }

    request.extend_from_slice(b"\r\n");
    Ok(request)
}
