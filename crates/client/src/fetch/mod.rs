//! Fetch pipeline: normalize, consult the cache, send, follow redirects.
//!
//! ### URL Normalization
//! - Trim whitespace, default scheme to `http`
//! - Empty path becomes `/`, query preserved, fragment dropped
//!
//! ### Redirects
//! - Only 301 and 302 are followed
//! - Relative `Location` values resolve against the current scheme and host
//! - Hop budget (default 10); exhausting it is `RedirectLimitExceeded`
//!
//! ### Cache
//! - Checked before every hop, keyed by SHA-256 of the hop URL
//! - Written on a miss under the requested URL and the final URL

pub mod redirect;
pub mod response;
pub mod transport;
pub mod url;

use std::sync::Arc;

use go2web_core::{AppConfig, CacheEntry, ContentCache, Error, cache_key};

pub use redirect::resolve_location;
pub use response::{RawResponse, parse};
pub use transport::{TcpTransport, Transport, build_request, request_headers};
pub use url::{RequestTarget, Scheme, UrlError, normalize};

/// Media type requested through the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accept {
    #[default]
    Html,
    Json,
}

impl Accept {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accept::Html => "text/html",
            Accept::Json => "application/json",
        }
    }
}

/// Configuration for the fetch engine.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "go2web/0.1")
    pub user_agent: String,

    /// Maximum number of round trips per fetch (default: 10)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { user_agent: "go2web/0.1".to_string(), max_redirects: 10 }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), max_redirects: config.max_redirects }
    }
}

/// A successfully fetched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub content_type: String,
    pub body: String,
}

impl From<CacheEntry> for Fetched {
    fn from(entry: CacheEntry) -> Self {
        Self { content_type: entry.content_type, body: entry.body }
    }
}

impl From<&Fetched> for CacheEntry {
    fn from(fetched: &Fetched) -> Self {
        CacheEntry::new(fetched.content_type.clone(), fetched.body.clone())
    }
}

/// Fetch engine combining transport, response parsing, redirects and cache.
pub struct FetchEngine {
    transport: Box<dyn Transport>,
    cache: Arc<dyn ContentCache>,
    config: FetchConfig,
}

impl FetchEngine {
    /// Create an engine over an explicit transport and cache handle.
    pub fn new(transport: impl Transport + 'static, cache: Arc<dyn ContentCache>, config: FetchConfig) -> Self {
        Self { transport: Box::new(transport), cache, config }
    }

    /// Fetch a URL, following redirects and using the cache.
    ///
    /// Failures are logged here and handed back as `Err`; nothing is retried.
    pub async fn fetch(&self, url: &str, accept: Accept) -> Result<Fetched, Error> {
        let result = match normalize(url) {
            Ok(target) => self.resolve(target, accept, self.config.max_redirects).await,
            Err(e) => Err(e.into()),
        };

        if let Err(e) = &result {
            tracing::warn!(url, code = e.code(), "fetch failed: {e}");
        }

        result
    }

    /// Follow `target` through at most `max_hops` round trips.
    pub async fn resolve(&self, target: RequestTarget, accept: Accept, max_hops: usize) -> Result<Fetched, Error> {
        let requested_key = cache_key(&target.to_string());
        let mut current = target;
        let mut hops_left = max_hops;

        loop {
            if hops_left == 0 {
                return Err(Error::RedirectLimitExceeded(max_hops));
            }

            let url = current.to_string();
            let key = cache_key(&url);

            if let Some(entry) = self.cache.get(&key) {
                tracing::debug!(url = %url, "cache hit");
                let fetched = Fetched::from(entry);
                if key != requested_key {
                    self.store(&requested_key, &fetched);
                }
                return Ok(fetched);
            }

            let headers = request_headers(&current, &self.config.user_agent, accept);
            let raw = self.transport.send(&current, &headers).await?;
            let response = parse(&raw);

            tracing::debug!(url = %url, status = ?response.status, bytes = raw.len(), "hop complete");

            if response.is_redirect()
                && let Some(location) = response.location()
            {
                let next = resolve_location(&current, location)?;
                tracing::debug!(from = %url, to = %next, "following redirect");
                current = next;
                hops_left -= 1;
                continue;
            }

            let fetched = Fetched { content_type: response.content_type().to_string(), body: response.body_text() };

            self.store(&key, &fetched);
            if key != requested_key {
                self.store(&requested_key, &fetched);
            }

            return Ok(fetched);
        }
    }

    /// Store a result; a failed write is logged and otherwise ignored.
    fn store(&self, key: &str, fetched: &Fetched) {
        if let Err(e) = self.cache.put(key, &CacheEntry::from(fetched)) {
            tracing::warn!(key, "failed to store cache entry: {e}");
        }
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use async_trait::async_trait;

    /// Transport that replays canned responses and records every request.
    #[derive(Clone, Default)]
    pub struct ScriptedTransport {
        responses: Arc<Mutex<VecDeque<Vec<u8>>>>,
        pub requests: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedTransport {
        pub fn new<I, R>(responses: I) -> Self
        where
            I: IntoIterator<Item = R>,
            R: Into<Vec<u8>>,
        {
            Self {
                responses: Arc::new(Mutex::new(responses.into_iter().map(Into::into).collect())),
                requests: Arc::default(),
            }
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn urls(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|request| request.lines().next().unwrap_or_default().to_string())
                .collect()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, target: &RequestTarget, headers: &[(String, String)]) -> Result<Vec<u8>, Error> {
            self.requests
                .lock()
                .unwrap()
                .push(format!("{target}\n{}", build_request(target, headers)));
            self.responses.lock().unwrap().pop_front().ok_or_else(|| {
                Error::transport(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "script exhausted"))
            })
        }
    }

    pub fn redirect(code: u16, location: &str) -> Vec<u8> {
        format!("HTTP/1.1 {code} Redirect\r\nLocation: {location}\r\nContent-Length: 0\r\n\r\n").into_bytes()
    }

    pub fn ok(content_type: &str, body: &str) -> Vec<u8> {
        format!("HTTP/1.1 200 OK\r\nContent-Type: {content_type}\r\n\r\n{body}").into_bytes()
    }
}
