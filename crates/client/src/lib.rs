//! Client code for go2web.
//!
//! This crate provides the raw HTTP/1.1 fetch pipeline (normalization,
//! transport, response parsing, redirects, caching), search-result scraping
//! and terminal rendering of fetched documents.

pub mod extract;
pub mod fetch;
pub mod render;
pub mod search;

pub use extract::{Link, extract_links};
pub use fetch::{
    Accept, FetchConfig, FetchEngine, Fetched, RawResponse, RequestTarget, Scheme, TcpTransport, Transport,
    UrlError, normalize,
};
pub use render::{format, render_html};
pub use search::{SearchClient, SearchConfig, SearchResult, format_results};
