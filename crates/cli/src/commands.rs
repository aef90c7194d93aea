//! Command execution: one fetch, one search, or a cache clear.
//!
//! Fetch and search failures are printed and swallowed; the process exits 0
//! either way.

use std::sync::Arc;

use go2web_client::{Accept, FetchConfig, FetchEngine, SearchClient, SearchConfig, TcpTransport, format, format_results};
use go2web_core::{AppConfig, ContentCache, DiskCache, MemoryCache};

use crate::args::Args;

/// Pick the cache for this run: the disk cache, or an in-memory one when
/// disabled or when the cache directory cannot be created.
fn open_cache(config: &AppConfig, disabled: bool) -> Arc<dyn ContentCache> {
    if disabled {
        return Arc::new(MemoryCache::new());
    }
    match DiskCache::open(&config.cache_dir) {
        Ok(cache) => Arc::new(cache),
        Err(e) => {
            tracing::warn!("disk cache unavailable, continuing without it: {e}");
            Arc::new(MemoryCache::new())
        }
    }
}

pub fn clear_cache(config: &AppConfig) {
    match DiskCache::open(&config.cache_dir).and_then(|cache| cache.clear()) {
        Ok(removed) => println!("Removed {removed} cached responses from {}", config.cache_dir.display()),
        Err(e) => eprintln!("Error: {e}"),
    }
}

pub async fn run(args: &Args, config: &AppConfig) {
    let transport = TcpTransport::new(config.read_timeout());
    let cache = open_cache(config, args.no_cache);
    let engine = FetchEngine::new(transport, cache, FetchConfig::from(config));

    if let Some(url) = &args.url {
        let accept = if args.json { Accept::Json } else { Accept::Html };
        match engine.fetch(url, accept).await {
            Ok(fetched) => println!("{}", format(&fetched.content_type, &fetched.body)),
            Err(e) => eprintln!("Error: {e}"),
        }
    } else if let Some(words) = &args.search {
        let query = words.join(" ");
        let client = SearchClient::new(&engine, SearchConfig::from(config));
        match client.search(&query).await {
            Ok(results) => println!("{}", format_results(&results)),
            Err(e) => eprintln!("Error: {e}"),
        }
    }
}
