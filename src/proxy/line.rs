//! Bounded Line Reading
//!
//! The line-oriented read primitive used for the request line and header
//! section: one CRLF-terminated line at a time, capped at a maximum
//! length so a hostile peer cannot grow the buffer without bound.

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

// == Read Line Bounded ==
/// Reads one line from a buffered stream, up to `max_len` bytes of
/// content.
///
/// Returns `Ok(None)` when the stream ends before any byte is read, and
/// `Ok(Some(line))` with the trailing CRLF (or bare LF) stripped
/// otherwise. A line still unterminated after `max_len` bytes produces an
/// `InvalidData` error; callers decide whether that means rejection or
/// truncation. A line cut short by end-of-stream is returned as-is.
pub(crate) async fn read_line_bounded<R>(
    reader: &mut R,
    max_len: usize,
) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut raw = Vec::new();
    // Allow for the CRLF itself on a maximally long line.
    let cap = (max_len + 2) as u64;
    let mut limited = reader.take(cap);
    let read = limited.read_until(b'\n', &mut raw).await?;

    if read == 0 {
        return Ok(None);
    }
    if !raw.ends_with(b"\n") && raw.len() as u64 >= cap {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "header line too long",
        ));
    }

    while matches!(raw.last(), Some(b'\n') | Some(b'\r')) {
        raw.pop();
    }
    Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn test_reads_crlf_lines_in_sequence() {
        let mut reader = BufReader::new(&b"GET / HTTP/1.0\r\nHost: x\r\n\r\n"[..]);

        assert_eq!(
            read_line_bounded(&mut reader, 8192).await.unwrap(),
            Some("GET / HTTP/1.0".to_string())
        );
        assert_eq!(
            read_line_bounded(&mut reader, 8192).await.unwrap(),
            Some("Host: x".to_string())
        );
        assert_eq!(
            read_line_bounded(&mut reader, 8192).await.unwrap(),
            Some(String::new())
        );
        assert_eq!(read_line_bounded(&mut reader, 8192).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_accepts_bare_lf_terminator() {
        let mut reader = BufReader::new(&b"Accept: */*\n"[..]);

        assert_eq!(
            read_line_bounded(&mut reader, 8192).await.unwrap(),
            Some("Accept: */*".to_string())
        );
    }

    #[tokio::test]
    async fn test_partial_line_at_eof_is_returned() {
        let mut reader = BufReader::new(&b"no terminator"[..]);

        assert_eq!(
            read_line_bounded(&mut reader, 8192).await.unwrap(),
            Some("no terminator".to_string())
        );
        assert_eq!(read_line_bounded(&mut reader, 8192).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_overlong_line_is_rejected() {
        let oversized = vec![b'x'; 100];
        let mut reader = BufReader::new(&oversized[..]);

        let error = read_line_bounded(&mut reader, 16).await.unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn test_line_at_exact_bound_is_accepted() {
        let mut input = vec![b'y'; 16];
        input.extend_from_slice(b"\r\nnext\r\n");
        let mut reader = BufReader::new(&input[..]);

        let line = read_line_bounded(&mut reader, 16).await.unwrap().unwrap();
        assert_eq!(line.len(), 16);
        assert_eq!(
            read_line_bounded(&mut reader, 16).await.unwrap(),
            Some("next".to_string())
        );
    }
}
