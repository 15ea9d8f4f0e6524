//! Nyaa search backend implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use tracing::debug;

use crate::config::IndexConfig;
use crate::metrics;

use super::parser::parse_search_page;
use super::{SearchError, SearchQuery, Searcher, TorrentCandidate};

/// Nyaa HTML search backend.
///
/// Nyaa has no search API; the listing page is fetched with browser-like
/// headers and its result table is scraped.
pub struct NyaaSearcher {
    client: Client,
    config: IndexConfig,
}

impl NyaaSearcher {
    /// Create a new NyaaSearcher with the given configuration.
    pub fn new(config: IndexConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .user_agent(config.user_agent.as_str())
            .default_headers(browser_headers(&config.base_url))
            .build()
            .map_err(|e| SearchError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Build the listing URL for a search.
    fn build_search_url(&self, query: &SearchQuery) -> String {
        let options = &query.options;
        format!(
            "{}/?f={}&c={}&q={}&s={}&o={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(&options.filter),
            urlencoding::encode(&options.category),
            urlencoding::encode(&query.query),
            urlencoding::encode(&options.sort),
            urlencoding::encode(&options.order),
        )
    }

    async fn fetch_page(&self, url: &str) -> Result<String, SearchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout
            } else if e.is_connect() {
                SearchError::ConnectionFailed(e.to_string())
            } else {
                SearchError::ApiError(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SearchError::ParseError(format!("Failed to read response body: {}", e)))
    }
}

/// Headers a desktop browser sends for a top-level navigation.
///
/// Compression headers are left to reqwest, which decodes gzip and brotli.
fn browser_headers(base_url: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9,fr;q=0.8"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-origin"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));

    let referer = format!("{}/", base_url.trim_end_matches('/'));
    if let Ok(value) = HeaderValue::from_str(&referer) {
        headers.insert(header::REFERER, value);
    }

    headers
}

#[async_trait]
impl Searcher for NyaaSearcher {
    fn name(&self) -> &str {
        "nyaa"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<TorrentCandidate>, SearchError> {
        let start = Instant::now();
        let url = self.build_search_url(query);
        debug!(url = %url, "Searching Nyaa");

        let result = self
            .fetch_page(&url)
            .await
            .map(|html| parse_search_page(&html, &self.config.base_url));

        metrics::record_external_call(
            "nyaa",
            "search",
            start.elapsed().as_secs_f64(),
            result.is_ok(),
        );

        let candidates = result?;
        metrics::SEARCH_RESULTS
            .with_label_values(&[])
            .observe(candidates.len() as f64);

        debug!(
            query = %query.query,
            results = candidates.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Nyaa search complete"
        );

        Ok(candidates)
    }
}
