//! Sequential multi-query candidate collection with deduplication.

use std::collections::HashSet;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::metrics;

use super::{SearchOptions, SearchQuery, Searcher, TorrentCandidate};

/// Why the aggregation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every query was tried.
    Exhausted,
    /// The distinct candidate count reached the cap.
    CapReached,
    /// The caller cancelled the request.
    Cancelled,
}

/// Outcome of running a query list against a searcher.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// Distinct candidates in discovery order.
    pub candidates: Vec<TorrentCandidate>,
    /// Queries actually dispatched.
    pub queries_issued: usize,
    /// Queries that failed and contributed nothing.
    pub failed_queries: usize,
    pub stop_reason: StopReason,
}

/// Run `queries` one at a time, collecting distinct candidates.
///
/// Before each query the loop stops if `cancel` has fired or the distinct
/// count has reached `max_candidates`. A single query may push the total past
/// the cap; the union is not truncated. Candidates are deduplicated by magnet
/// URI, first occurrence wins. A failed query is logged and skipped.
pub async fn aggregate_candidates(
    searcher: &dyn Searcher,
    queries: &[String],
    options: &SearchOptions,
    max_candidates: usize,
    cancel: &CancellationToken,
) -> AggregationResult {
    let mut candidates: Vec<TorrentCandidate> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut queries_issued = 0;
    let mut failed_queries = 0;
    let mut stop_reason = StopReason::Exhausted;

    for query in queries {
        if cancel.is_cancelled() {
            stop_reason = StopReason::Cancelled;
            break;
        }
        if candidates.len() >= max_candidates {
            stop_reason = StopReason::CapReached;
            break;
        }

        queries_issued += 1;
        metrics::SEARCH_QUERIES.inc();

        let search_query = SearchQuery::new(query.as_str(), options.clone());
        match searcher.search(&search_query).await {
            Ok(results) => {
                let before = candidates.len();
                for candidate in results {
                    if seen.insert(candidate.magnet_uri.clone()) {
                        candidates.push(candidate);
                    }
                }
                debug!(
                    searcher = searcher.name(),
                    query = %query,
                    new_candidates = candidates.len() - before,
                    total = candidates.len(),
                    "Query complete"
                );
            }
            Err(e) => {
                failed_queries += 1;
                metrics::SEARCH_FAILURES.inc();
                warn!(
                    searcher = searcher.name(),
                    query = %query,
                    error = %e,
                    "Query failed, continuing with remaining queries"
                );
            }
        }
    }

    AggregationResult {
        candidates,
        queries_issued,
        failed_queries,
        stop_reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searcher::SearchError;
    use crate::testing::{fixtures, MockSearcher};

    fn queries(list: &[&str]) -> Vec<String> {
        list.iter().map(|q| q.to_string()).collect()
    }

    #[tokio::test]
    async fn test_dedup_first_seen_wins() {
        let searcher = MockSearcher::new();
        searcher
            .set_query_handler(|query| match query {
                "a" => Some(vec![
                    fixtures::candidate("First copy", "hash1", 10),
                    fixtures::candidate("Other", "hash2", 5),
                ]),
                "b" => Some(vec![
                    fixtures::candidate("Second copy", "hash1", 99),
                    fixtures::candidate("Third", "hash3", 1),
                ]),
                _ => Some(vec![]),
            })
            .await;

        let result = aggregate_candidates(
            &searcher,
            &queries(&["a", "b"]),
            &SearchOptions::default(),
            30,
            &CancellationToken::new(),
        )
        .await;

        let titles: Vec<_> = result.candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["First copy", "Other", "Third"]);
        assert_eq!(result.queries_issued, 2);
        assert_eq!(result.stop_reason, StopReason::Exhausted);
    }

    #[tokio::test]
    async fn test_cap_checked_before_each_query() {
        let searcher = MockSearcher::new();
        searcher
            .set_query_handler(|query| {
                Some(
                    (0..20)
                        .map(|i| fixtures::candidate(query, &format!("{}-{}", query, i), 1))
                        .collect(),
                )
            })
            .await;

        let result = aggregate_candidates(
            &searcher,
            &queries(&["q1", "q2", "q3"]),
            &SearchOptions::default(),
            30,
            &CancellationToken::new(),
        )
        .await;

        // Two queries ran (0 -> 20 -> 40); the third was suppressed, no truncation
        assert_eq!(result.queries_issued, 2);
        assert_eq!(result.candidates.len(), 40);
        assert_eq!(result.stop_reason, StopReason::CapReached);
        assert_eq!(searcher.search_count().await, 2);
    }

    #[tokio::test]
    async fn test_failed_query_is_skipped() {
        let searcher = MockSearcher::new();
        searcher
            .set_query_handler(|query| Some(vec![fixtures::candidate(query, query, 1)]))
            .await;
        searcher
            .set_next_error(SearchError::ConnectionFailed("boom".into()))
            .await;

        let result = aggregate_candidates(
            &searcher,
            &queries(&["broken", "works"]),
            &SearchOptions::default(),
            30,
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(result.queries_issued, 2);
        assert_eq!(result.failed_queries, 1);
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].title, "works");
    }

    #[tokio::test]
    async fn test_cancelled_token_dispatches_nothing() {
        let searcher = MockSearcher::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = aggregate_candidates(
            &searcher,
            &queries(&["a", "b"]),
            &SearchOptions::default(),
            30,
            &cancel,
        )
        .await;

        assert_eq!(result.queries_issued, 0);
        assert_eq!(result.stop_reason, StopReason::Cancelled);
        assert_eq!(searcher.search_count().await, 0);
    }

    #[tokio::test]
    async fn test_cancellation_between_queries() {
        let searcher = MockSearcher::new();
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        searcher
            .set_query_handler(move |query| {
                trigger.cancel();
                Some(vec![fixtures::candidate(query, query, 1)])
            })
            .await;

        let result = aggregate_candidates(
            &searcher,
            &queries(&["a", "b", "c"]),
            &SearchOptions::default(),
            30,
            &cancel,
        )
        .await;

        assert_eq!(result.queries_issued, 1);
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.stop_reason, StopReason::Cancelled);
    }

    #[tokio::test]
    async fn test_empty_query_list() {
        let searcher = MockSearcher::new();
        let result = aggregate_candidates(
            &searcher,
            &[],
            &SearchOptions::default(),
            30,
            &CancellationToken::new(),
        )
        .await;

        assert!(result.candidates.is_empty());
        assert_eq!(result.stop_reason, StopReason::Exhausted);
    }

    #[tokio::test]
    async fn test_options_forwarded_to_searcher() {
        let searcher = MockSearcher::new();
        let options = SearchOptions {
            category: "1_0".to_string(),
            ..SearchOptions::default()
        };

        aggregate_candidates(
            &searcher,
            &queries(&["x"]),
            &options,
            30,
            &CancellationToken::new(),
        )
        .await;

        let searches = searcher.recorded_searches().await;
        assert_eq!(searches[0].query.query, "x");
        assert_eq!(searches[0].query.options.category, "1_0");
    }
}
