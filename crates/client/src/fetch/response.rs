//! Parsing of raw HTTP/1.1 responses read off the wire.
//!
//! The transport hands back everything the peer sent before closing. Parsing
//! never fails: undecodable bytes are replaced, an unparsable status line
//! yields `status: None`, and a missing header/body boundary yields an empty
//! body.

use std::borrow::Cow;

/// Content type assumed when the response does not name one.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

const BOUNDARY: &[u8] = b"\r\n\r\n";

/// A response split into status line, headers and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status_line: String,
    /// Status code from the status line, if it could be parsed.
    pub status: Option<u16>,
    /// Lowercased header names in first-seen order; the last value wins.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Header value by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// `Content-Type` value, defaulting to `text/html`.
    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    /// `Location` value for redirects.
    pub fn location(&self) -> Option<&str> {
        self.header("location").filter(|value| !value.is_empty())
    }

    /// Only 301 and 302 are followed; other 3xx codes are passed through.
    pub fn is_redirect(&self) -> bool {
        matches!(self.status, Some(301 | 302))
    }

    /// Body decoded as UTF-8 with invalid sequences replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Parse the status code out of `HTTP/<ver> <code> <reason>`.
fn parse_status(line: &str) -> Option<u16> {
    let mut parts = line.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}

fn insert_header(headers: &mut Vec<(String, String)>, name: String, value: &str) {
    match headers.iter_mut().find(|(key, _)| *key == name) {
        Some(slot) => slot.1 = value.to_string(),
        None => headers.push((name, value.to_string())),
    }
}

/// Split raw bytes into a `RawResponse`.
pub fn parse(raw: &[u8]) -> RawResponse {
    let (head, body) = match raw.windows(BOUNDARY.len()).position(|w| w == BOUNDARY) {
        Some(idx) => (&raw[..idx], &raw[idx + BOUNDARY.len()..]),
        None => {
            tracing::debug!(bytes = raw.len(), "no header/body boundary in response; body left empty");
            (raw, &raw[raw.len()..])
        }
    };

    let head: Cow<'_, str> = String::from_utf8_lossy(head);
    let mut lines = head.split("\r\n");

    let status_line = lines.next().unwrap_or_default().trim().to_string();
    let status = parse_status(&status_line);

    let mut headers = Vec::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            insert_header(&mut headers, name.trim().to_ascii_lowercase(), value.trim());
        }
    }

    RawResponse { status_line, status, headers, body: body.to_vec() }
}
