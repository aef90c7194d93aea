//! HTML extraction helpers.
//!
//! Search pages are scraped by selecting result anchors with a CSS selector
//! and reading their text and `href`.

pub mod links;

pub use links::{Link, extract_links};
