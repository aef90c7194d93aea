//! Content-addressed cache key generation.

use sha2::{Digest, Sha256};

/// Compute the cache key for a request URL.
///
/// The key is the lowercase hex SHA-256 of the URL string and is used as-is
/// for lookups; it is never hashed a second time.
pub fn cache_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}
