//! Search-engine scraping.
//!
//! Builds a query URL from a template, fetches the result page through the
//! regular fetch pipeline (so search pages are cached like any other URL),
//! and pulls the result anchors out with a CSS selector.
//!
//! - **Endpoint**: `https://html.duckduckgo.com/html/?q={query}` by default
//! - **Selector**: `a.result__a`, one anchor per organic result
//! - **Cap**: first 10 results, in document order

use go2web_core::{AppConfig, Error};
use url::form_urlencoded;

use crate::extract::extract_links;
use crate::fetch::{Accept, FetchEngine};

/// Search client configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Endpoint template with a `{query}` placeholder.
    pub endpoint: String,
    /// CSS selector matching result anchors.
    pub selector: String,
    /// Maximum number of results returned (default: 10).
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: go2web_core::config::DEFAULT_SEARCH_ENDPOINT.to_string(),
            selector: go2web_core::config::DEFAULT_SEARCH_SELECTOR.to_string(),
            max_results: 10,
        }
    }
}

impl From<&AppConfig> for SearchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            endpoint: config.search_endpoint.clone(),
            selector: config.search_selector.clone(),
            max_results: config.max_results,
        }
    }
}

/// One search hit. `link` is the anchor's href as the engine wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
}

/// Search client layered over the fetch engine.
pub struct SearchClient<'a> {
    engine: &'a FetchEngine,
    config: SearchConfig,
}

impl<'a> SearchClient<'a> {
    pub fn new(engine: &'a FetchEngine, config: SearchConfig) -> Self {
        Self { engine, config }
    }

    /// URL of the result page for `query`.
    pub fn query_url(&self, query: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        self.config.endpoint.replace("{query}", &encoded)
    }

    /// Run a search and return at most `max_results` hits.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("query cannot be empty".into()));
        }

        let url = self.query_url(query);
        tracing::debug!(query, url = %url, "searching");

        let page = self.engine.fetch(&url, Accept::Html).await?;

        let mut results: Vec<SearchResult> = extract_links(&page.body, &self.config.selector)?
            .into_iter()
            .map(|link| SearchResult { title: link.text, link: link.href })
            .collect();
        results.truncate(self.config.max_results);

        tracing::debug!(query, count = results.len(), "search completed");
        Ok(results)
    }
}

/// Numbered listing printed for `go2web -s`.
pub fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No results found.".to_string();
    }

    results
        .iter()
        .enumerate()
        .map(|(rank, result)| format!("{}. {}\n   {}", rank + 1, result.title, result.link))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::fetch::FetchConfig;
    use crate::fetch::testing::{ScriptedTransport, ok};
    use go2web_core::MemoryCache;

    fn results_page(count: usize) -> String {
        let mut html = String::from("<html><body><a class=\"header\" href=\"/settings\">Settings</a>");
        for i in 1..=count {
            html.push_str(&format!(
                "<div class=\"result\"><h2><a class=\"result__a\" href=\"https://site{i}.test/\">Cat page {i}</a></h2>\
                 <a class=\"result__snippet\" href=\"https://site{i}.test/\">snippet</a></div>"
            ));
        }
        html.push_str("</body></html>");
        html
    }

    fn engine(transport: &ScriptedTransport) -> FetchEngine {
        FetchEngine::new(transport.clone(), Arc::new(MemoryCache::new()), FetchConfig::default())
    }

    #[test]
    fn test_search_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.endpoint, "https://html.duckduckgo.com/html/?q={query}");
        assert_eq!(config.selector, "a.result__a");
        assert_eq!(config.max_results, 10);
    }

    #[test]
    fn test_query_url_encoding() {
        let transport = ScriptedTransport::default();
        let engine = engine(&transport);
        let client = SearchClient::new(&engine, SearchConfig::default());

        assert_eq!(client.query_url("rust & c++"), "https://html.duckduckgo.com/html/?q=rust+%26+c%2B%2B");
    }

    #[tokio::test]
    async fn test_search_caps_at_ten_in_order() {
        let transport = ScriptedTransport::new([ok("text/html", &results_page(15))]);
        let engine = engine(&transport);
        let client = SearchClient::new(&engine, SearchConfig::default());

        let results = client.search("cats").await.unwrap();

        assert_eq!(results.len(), 10);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.title, format!("Cat page {}", i + 1));
            assert_eq!(result.link, format!("https://site{}.test/", i + 1));
        }
        assert_eq!(transport.urls(), ["https://html.duckduckgo.com/html/?q=cats"]);
    }

    #[tokio::test]
    async fn test_search_fewer_results() {
        let transport = ScriptedTransport::new([ok("text/html", &results_page(3))]);
        let engine = engine(&transport);
        let client = SearchClient::new(&engine, SearchConfig::default());

        assert_eq!(client.search("dogs").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search_empty_query() {
        let transport = ScriptedTransport::default();
        let engine = engine(&transport);
        let client = SearchClient::new(&engine, SearchConfig::default());

        assert!(matches!(client.search("  ").await, Err(Error::InvalidInput(_))));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_search_fetch_failure_propagates() {
        let transport = ScriptedTransport::default();
        let engine = engine(&transport);
        let client = SearchClient::new(&engine, SearchConfig::default());

        assert!(matches!(client.search("cats").await, Err(Error::Transport(_))));
    }

    #[test]
    fn test_format_results() {
        let results = vec![
            SearchResult { title: "First".into(), link: "https://a.test/".into() },
            SearchResult { title: "Second".into(), link: "/l/?uddg=b".into() },
        ];
        assert_eq!(format_results(&results), "1. First\n   https://a.test/\n2. Second\n   /l/?uddg=b");
    }

    #[test]
    fn test_format_single_result_has_no_trailing_newline() {
        let results = [SearchResult { title: "Only".into(), link: "https://only.test/".into() }];
        assert_eq!(format_results(&results), "1. Only\n   https://only.test/");
    }

    #[test]
    fn test_format_no_results() {
        assert_eq!(format_results(&[]), "No results found.");
    }
}
