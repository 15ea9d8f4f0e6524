//! Types for the torrent search system.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::IndexConfig;

/// Index-side search options, passed verbatim as URL parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Category code ("1_2" = Anime, English-translated).
    pub category: String,
    /// Filter code ("0" = no filter).
    pub filter: String,
    /// Sort key.
    pub sort: String,
    /// Sort order.
    pub order: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from(&IndexConfig::default())
    }
}

impl From<&IndexConfig> for SearchOptions {
    fn from(config: &IndexConfig) -> Self {
        Self {
            category: config.category.clone(),
            filter: config.filter.clone(),
            sort: config.sort.clone(),
            order: config.order.clone(),
        }
    }
}

/// Query parameters for a torrent search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text search query.
    pub query: String,
    /// Index options (category, filter, sort).
    pub options: SearchOptions,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, options: SearchOptions) -> Self {
        Self {
            query: query.into(),
            options,
        }
    }
}

/// One row of an index search result page.
///
/// Rows without a magnet link or title are never constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorrentCandidate {
    /// Release title as listed.
    pub title: String,
    /// Category label as reported by the index.
    pub category: String,
    /// Absolute URL of the torrent page.
    pub link: String,
    /// Magnet URI - used for deduplication and as the playable handle.
    pub magnet_uri: String,
    /// Human-readable size ("1.4 GiB").
    pub size: String,
    /// Published date as displayed by the index.
    pub date: String,
    /// Published date parsed from the row timestamp, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub seeders: u32,
    pub leechers: u32,
    /// Completed downloads.
    pub downloads: u32,
}

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Index connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Index API error: {0}")]
    ApiError(String),

    #[error("Failed to parse search results: {0}")]
    ParseError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Trait for torrent index backends.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Run a single search and return the rows of the result page.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<TorrentCandidate>, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_options_default_matches_index_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.category, "1_2");
        assert_eq!(options.filter, "0");
        assert_eq!(options.sort, "seeders");
        assert_eq!(options.order, "desc");
    }

    #[test]
    fn test_torrent_candidate_serialization_skips_missing_timestamp() {
        let candidate = TorrentCandidate {
            title: "[Erai-raws] Show - 01 [1080p]".to_string(),
            category: "Anime - English-translated".to_string(),
            link: "https://nyaa.si/view/1".to_string(),
            magnet_uri: "magnet:?xt=urn:btih:abc123".to_string(),
            size: "1.4 GiB".to_string(),
            date: "2024-01-01 12:00".to_string(),
            published_at: None,
            seeders: 10,
            leechers: 2,
            downloads: 100,
        };

        let json = serde_json::to_string(&candidate).unwrap();
        assert!(!json.contains("published_at"));

        let parsed: TorrentCandidate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, candidate);
    }

    #[test]
    fn test_search_error_display() {
        assert_eq!(SearchError::Timeout.to_string(), "Request timeout");
        assert_eq!(
            SearchError::ApiError("HTTP 503".to_string()).to_string(),
            "Index API error: HTTP 503"
        );
    }
}
