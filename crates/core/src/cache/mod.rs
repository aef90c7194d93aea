//! Content cache for fetched responses.
//!
//! Responses are stored whole, keyed by a SHA-256 digest of the requested
//! URL. Entries are written once on a miss and never expire:
//!
//! - `DiskCache`: one JSON file per key in a per-user directory
//! - `MemoryCache`: an in-process map for tests and `--no-cache` runs

pub mod disk;
pub mod hash;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::Error;

pub use disk::DiskCache;
pub use hash::cache_key;
pub use memory::MemoryCache;

/// A cached response body with the content type it was served as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub content_type: String,
    pub body: String,
}

impl CacheEntry {
    pub fn new(content_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self { content_type: content_type.into(), body: body.into() }
    }
}

/// Key/value store consulted before every network round trip.
///
/// Lookups never fail: anything that prevents reading an entry is a miss.
pub trait ContentCache: Send + Sync {
    /// Look up an entry by key.
    fn get(&self, key: &str) -> Option<CacheEntry>;

    /// Store an entry, replacing any previous value for the key.
    fn put(&self, key: &str, entry: &CacheEntry) -> Result<(), Error>;
}
