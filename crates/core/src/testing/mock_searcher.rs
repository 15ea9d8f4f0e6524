//! Mock searcher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::searcher::{SearchError, SearchQuery, Searcher, TorrentCandidate};

/// A recorded search for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    /// The query that was searched.
    pub query: SearchQuery,
    /// When the search was made.
    pub timestamp: Instant,
}

/// A query handler that produces results dynamically based on the query.
type QueryHandler = Box<dyn Fn(&str) -> Option<Vec<TorrentCandidate>> + Send + Sync>;

/// Mock implementation of the Searcher trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable search results
/// - Track search queries for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use nyaa_addon_core::testing::{MockSearcher, fixtures};
///
/// let searcher = MockSearcher::with_results(vec![
///     fixtures::candidate("[Erai-raws] Frieren - 03 [1080p][VOSTFR]", "abc123", 50),
/// ]);
///
/// let rows = searcher.search(&SearchQuery::new("frieren", options)).await?;
/// assert_eq!(rows.len(), 1);
///
/// let searches = searcher.recorded_searches().await;
/// assert_eq!(searches[0].query.query, "frieren");
/// ```
pub struct MockSearcher {
    /// Configured results to return.
    results: Arc<RwLock<Vec<TorrentCandidate>>>,
    /// Recorded search queries.
    searches: Arc<RwLock<Vec<RecordedSearch>>>,
    /// If set, the next search will fail with this error.
    next_error: Arc<RwLock<Option<SearchError>>>,
    /// Query handler for dynamic result generation based on query string.
    query_handler: Arc<RwLock<Option<QueryHandler>>>,
}

impl std::fmt::Debug for MockSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSearcher")
            .field("results", &"<results>")
            .field("searches", &"<searches>")
            .field("next_error", &"<next_error>")
            .field("query_handler", &"<handler>")
            .finish()
    }
}

impl Default for MockSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSearcher {
    /// Create a new mock searcher with empty results.
    pub fn new() -> Self {
        Self::with_results(Vec::new())
    }

    /// Create a mock searcher with predefined results.
    pub fn with_results(results: Vec<TorrentCandidate>) -> Self {
        Self {
            results: Arc::new(RwLock::new(results)),
            searches: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            query_handler: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the results to return for subsequent searches.
    pub async fn set_results(&self, results: Vec<TorrentCandidate>) {
        *self.results.write().await = results;
    }

    /// Get recorded search queries.
    pub async fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.read().await.clone()
    }

    /// Get the number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set a query handler that dynamically generates results based on the query string.
    ///
    /// The handler returns `Some(results)` to answer the query, or `None` to
    /// fall back to the configured results.
    pub async fn set_query_handler<F>(&self, handler: F)
    where
        F: Fn(&str) -> Option<Vec<TorrentCandidate>> + Send + Sync + 'static,
    {
        *self.query_handler.write().await = Some(Box::new(handler));
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<SearchError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl Searcher for MockSearcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<TorrentCandidate>, SearchError> {
        // Record the search
        self.searches.write().await.push(RecordedSearch {
            query: query.clone(),
            timestamp: Instant::now(),
        });

        // Check for injected error
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        // Check if query handler provides results
        let handler = self.query_handler.read().await;
        if let Some(ref h) = *handler {
            if let Some(handler_results) = h(&query.query) {
                return Ok(handler_results);
            }
        }
        drop(handler);

        // Default: every query word must appear in the title (case-insensitive)
        let query_lower = query.query.to_lowercase();
        let results = self.results.read().await;
        Ok(results
            .iter()
            .filter(|c| {
                let title = c.title.to_lowercase();
                query_lower
                    .split_whitespace()
                    .all(|word| title.contains(word))
            })
            .cloned()
            .collect())
    }
}
