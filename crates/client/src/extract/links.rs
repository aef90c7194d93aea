//! Link harvesting from HTML documents.

use go2web_core::Error;
use scraper::{Html, Selector};

/// A harvested link with text and href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Link text content, whitespace-collapsed
    pub text: String,
    /// The `href` attribute exactly as written
    pub href: String,
}

/// Extract the anchors matching `selector`, in document order.
///
/// Anchors without an `href` are skipped. Hrefs are returned unresolved, so
/// relative or tracking-redirect links come back as the page wrote them.
pub fn extract_links(html: &str, selector: &str) -> Result<Vec<Link>, Error> {
    let parsed = Selector::parse(selector)
        .map_err(|e| Error::InvalidInput(format!("invalid selector {selector:?}: {e}")))?;
    let document = Html::parse_document(html);

    let links = document
        .select(&parsed)
        .filter_map(|element| {
            let href = element.value().attr("href")?.trim().to_string();
            let text = element.text().collect::<Vec<_>>().join(" ");
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            let text = if text.is_empty() { "[link]".to_string() } else { text };
            Some(Link { text, href })
        })
        .collect();

    Ok(links)
}
