//! URL normalization into a request target.
//!
//! This is deliberately not a general URL parser: the host is kept exactly as
//! written (no case folding, no IDNA) and the path is never percent-decoded,
//! so the request line carries what the user typed.

use std::fmt;

/// Error type for URL normalization failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("missing host in {0:?}")]
    MissingHost(String),

    #[error("invalid port in {0:?}")]
    InvalidPort(String),
}

impl From<UrlError> for go2web_core::Error {
    fn from(err: UrlError) -> Self {
        go2web_core::Error::InvalidUrl(err.to_string())
    }
}

/// Supported URL schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Port used when the authority does not name one.
    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a request goes: scheme, authority and path (with query).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub scheme: Scheme,
    /// Authority as written, possibly with `:port`. Sent verbatim as `Host`.
    pub host: String,
    /// Path plus `?query`; never empty.
    pub path: String,
}

impl RequestTarget {
    /// Host name without any port, suitable for DNS and SNI.
    pub fn hostname(&self) -> &str {
        split_authority(&self.host).0
    }

    /// Port to connect to.
    pub fn port(&self) -> u16 {
        match split_authority(&self.host).1 {
            Some(port) => port.parse().unwrap_or_else(|_| self.scheme.default_port()),
            None => self.scheme.default_port(),
        }
    }

    /// `scheme://host`, the base relative redirects are resolved against.
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

impl fmt::Display for RequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.host, self.path)
    }
}

/// Split `input` into `(scheme, rest)` if it starts with `<scheme>://`.
///
/// A `://` that appears after a path or query character (as in
/// `example.com/?next=http://other`) does not count as a scheme delimiter.
pub fn split_scheme(input: &str) -> Option<(&str, &str)> {
    let idx = input.find("://")?;
    let scheme = &input[..idx];
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    Some((scheme, &input[idx + 3..]))
}

/// Split an authority into host name and the raw port text, if any.
fn split_authority(authority: &str) -> (&str, Option<&str>) {
    if let Some(rest) = authority.strip_prefix('[') {
        // IPv6 literal: [addr] or [addr]:port
        return match rest.split_once(']') {
            Some((addr, tail)) => (addr, tail.strip_prefix(':')),
            None => (authority, None),
        };
    }
    match authority.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    }
}

/// Normalize a user-supplied URL into a request target.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Prepend `http://` if no scheme is present
/// 3. Split authority, path and query; drop the fragment
/// 4. Empty path becomes `/`; a non-empty query is appended as `?query`
pub fn normalize(input: &str) -> Result<RequestTarget, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let (scheme, rest) = split_scheme(trimmed).unwrap_or(("http", trimmed));

    let scheme = match scheme.to_ascii_lowercase().as_str() {
        "http" => Scheme::Http,
        "https" => Scheme::Https,
        other => return Err(UrlError::UnsupportedScheme(other.to_string())),
    };

    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, remainder) = rest.split_at(authority_end);

    // Credentials are never sent; `Host` carries only host and port.
    let authority = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

    let (hostname, port) = split_authority(authority);
    if hostname.is_empty() {
        return Err(UrlError::MissingHost(trimmed.to_string()));
    }
    if let Some((_, tail)) = authority.strip_prefix('[').and_then(|rest| rest.split_once(']'))
        && !tail.is_empty()
        && !tail.starts_with(':')
    {
        return Err(UrlError::InvalidPort(trimmed.to_string()));
    }
    if let Some(port) = port
        && port.parse::<u16>().is_err()
    {
        return Err(UrlError::InvalidPort(trimmed.to_string()));
    }

    let without_fragment = remainder.split('#').next().unwrap_or_default();
    let (path, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (without_fragment, None),
    };

    let mut path = if path.is_empty() { "/".to_string() } else { path.to_string() };
    if let Some(query) = query
        && !query.is_empty()
    {
        path.push('?');
        path.push_str(query);
    }

    Ok(RequestTarget { scheme, host: authority.to_string(), path })
}
