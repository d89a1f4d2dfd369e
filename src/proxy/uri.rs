//! URI Resolver Module
//!
//! Pure parsing of a request target into its origin host, port and path.

// == Constants ==
/// Default origin port when the target names none
pub const HTTP_PORT: u16 = 80;

// == Request Target ==
/// The origin coordinates resolved from a request URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    /// Origin host name or address literal
    pub host: String,
    /// Origin port, defaulting to 80
    pub port: u16,
    /// Absolute path sent to the origin, defaulting to "/"
    pub path: String,
}

// == Parse URI ==
/// Resolves an absolute-form request target into (host, port, path).
///
/// Accepts `http://host[:port]/path` as well as the bare
/// `host[:port]/path` form. This function never fails: a missing path
/// becomes `/`, and a missing or non-numeric port becomes 80. Callers get
/// best-effort coordinates and surface any problem when the connect is
/// attempted.
pub fn parse_uri(uri: &str) -> RequestTarget {
    // Skip the scheme prefix, if any, by jumping past the first "//".
    let rest = match uri.find("//") {
        Some(index) => &uri[index + 2..],
        None => uri,
    };

    // Everything from the first '/' on is the path.
    let (authority, path) = match rest.find('/') {
        Some(index) => (&rest[..index], &rest[index..]),
        None => (rest, "/"),
    };

    // A ':' inside the authority introduces an explicit port.
    let (host, port) = match authority.split_once(':') {
        Some((host, port_raw)) => (host, port_raw.parse::<u16>().unwrap_or(HTTP_PORT)),
        None => (authority, HTTP_PORT),
    };

    RequestTarget {
        host: host.to_string(),
        port,
        path: path.to_string(),
    }
}
