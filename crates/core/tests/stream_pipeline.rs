//! Stream pipeline integration tests.
//!
//! These tests drive `StreamHandler` through the public API with mock search
//! and resolution backends:
//! - Query order and alias expansion as seen by the index
//! - Candidate cap and deduplication across queries
//! - Ranking and presentation of the final stream list
//! - Degradation to an empty list on failures

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use nyaa_addon_core::{
    load_config_from_str,
    searcher::SearchError,
    testing::{fixtures, MockResolver, MockSearcher},
    ContentType, StreamHandler, StreamRequest, TorrentCandidate,
};

/// Test helper wiring a handler to mocks with a given config.
struct TestHarness {
    handler: StreamHandler,
    searcher: Arc<MockSearcher>,
    resolver: Arc<MockResolver>,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_config("")
    }

    fn with_config(toml: &str) -> Self {
        let config = load_config_from_str(toml).expect("Failed to parse config");
        let searcher = Arc::new(MockSearcher::new());
        let resolver = Arc::new(MockResolver::new());
        let handler = StreamHandler::from_config(&config, searcher.clone(), resolver.clone());

        Self {
            handler,
            searcher,
            resolver,
        }
    }

    async fn streams(&self, request: StreamRequest) -> Vec<nyaa_addon_core::Stream> {
        self.handler
            .get_streams(&request, &CancellationToken::new())
            .await
    }

    async fn queries(&self) -> Vec<String> {
        self.searcher
            .recorded_searches()
            .await
            .into_iter()
            .map(|s| s.query.query)
            .collect()
    }
}

fn batch(prefix: &str, count: usize) -> Vec<TorrentCandidate> {
    (0..count)
        .map(|i| {
            fixtures::candidate(
                &format!("[Group] {} {} [1080p][VOSTFR]", prefix, i),
                &format!("{}-{}", prefix, i),
                i as u32,
            )
        })
        .collect()
}

#[tokio::test]
async fn test_builtin_aliases_expand_contained_keys() {
    let harness = TestHarness::new();
    harness
        .resolver
        .set_title("tt21209876", "Frieren: Beyond Journey's End")
        .await;

    harness
        .streams(StreamRequest::new(ContentType::Series, "tt21209876:1:3"))
        .await;

    let queries = harness.queries().await;
    assert_eq!(
        &queries[..4],
        &[
            "Frieren: Beyond Journey's End S01E03",
            "Frieren: Beyond Journey's End 1st Season - 03",
            "Frieren: Beyond Journey's End S1 - 03",
            "Frieren: Beyond Journey's End - 03",
        ]
    );
    assert_eq!(
        &queries[4..],
        &[
            "Sousou no Frieren 1st Season - 03",
            "Sousou no Frieren S01E03",
            "Sousou no Frieren - 03",
        ]
    );
}

#[tokio::test]
async fn test_configured_aliases_replace_builtin_table() {
    let harness = TestHarness::with_config(
        r#"
[[aliases]]
canonical = "Dungeon Meshi"
alternates = ["Delicious in Dungeon"]
"#,
    );

    harness
        .streams(StreamRequest::new(ContentType::Series, "kitsu:45678:2").with_name("Frieren"))
        .await;
    assert_eq!(harness.queries().await.len(), 4);

    harness
        .streams(StreamRequest::new(ContentType::Series, "kitsu:45678:2").with_name("Dungeon Meshi"))
        .await;
    assert!(harness
        .queries()
        .await
        .contains(&"Delicious in Dungeon 1st Season - 02".to_string()));
}

#[tokio::test]
async fn test_candidate_cap_suppresses_later_queries() {
    let harness = TestHarness::new();
    harness
        .searcher
        .set_query_handler(|query| {
            if query.ends_with("S01E01") {
                Some(batch("first", 25))
            } else if query.ends_with("1st Season - 01") {
                Some(batch("second", 10))
            } else {
                Some(batch("late", 5))
            }
        })
        .await;

    let streams = harness
        .streams(StreamRequest::new(ContentType::Series, "tt1:1:1").with_name("Show"))
        .await;

    // 25 then 35 distinct candidates: the third query is never sent
    assert_eq!(harness.queries().await.len(), 2);
    assert_eq!(streams.len(), 20);
    assert!(streams.iter().all(|s| !s.url.contains("late")));
}

#[tokio::test]
async fn test_duplicates_across_queries_collapse() {
    let harness = TestHarness::new();
    harness
        .searcher
        .set_query_handler(|_| {
            Some(vec![fixtures::candidate(
                "[Erai-raws] Show - 01 [1080p][VOSTFR]",
                "same",
                42,
            )])
        })
        .await;

    let streams = harness
        .streams(StreamRequest::new(ContentType::Series, "tt1:1:1").with_name("Show"))
        .await;

    assert_eq!(harness.queries().await.len(), 4);
    assert_eq!(streams.len(), 1);
    assert_eq!(streams[0].title, "[Erai-raws] 1080p 🇫🇷 👤 42 | 💾 1.0 GiB");
}

#[tokio::test]
async fn test_ranking_policy_from_config() {
    let harness = TestHarness::with_config(
        r#"
[ranking]
require_french_subs = false
preferred_groups = ["SubsPlease"]
preferred_qualities = ["720p"]
max_results = 2
"#,
    );
    harness
        .searcher
        .set_results(vec![
            fixtures::candidate("[Erai-raws] Show - 01 [1080p][VOSTFR]", "a", 100),
            fixtures::candidate("[SubsPlease] Show - 01 (1080p)", "b", 50),
            fixtures::candidate("[SubsPlease] Show - 01 (720p)", "c", 10),
            fixtures::candidate("[Other] Show - 01 (720p)", "d", 5),
        ])
        .await;

    let streams = harness
        .streams(StreamRequest::new(ContentType::Movie, "tt1").with_name("Show"))
        .await;

    let urls: Vec<_> = streams.iter().map(|s| s.url.as_str()).collect();
    // French first, then the preferred group ordered by listed quality
    assert_eq!(urls, vec!["magnet:?xt=urn:btih:a", "magnet:?xt=urn:btih:c"]);
}

#[tokio::test]
async fn test_failed_queries_do_not_abort_request() {
    let harness = TestHarness::new();
    harness
        .searcher
        .set_results(vec![fixtures::candidate(
            "[Erai-raws] Show - 01 [1080p][VOSTFR]",
            "ok",
            1,
        )])
        .await;
    harness
        .searcher
        .set_next_error(SearchError::ApiError("HTTP 503".into()))
        .await;

    let streams = harness
        .streams(StreamRequest::new(ContentType::Series, "tt1:1:1").with_name("Show"))
        .await;

    assert_eq!(harness.queries().await.len(), 4);
    assert_eq!(streams.len(), 1);
}
