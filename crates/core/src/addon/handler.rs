//! End-to-end stream resolution for one Stremio request.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::metrics;
use crate::query::QueryBuilder;
use crate::ranking::{enrich, rank_candidates, RankingPolicy};
use crate::resolver::TitleResolver;
use crate::searcher::{aggregate_candidates, SearchOptions, Searcher, StopReason};
use crate::title::normalize_title;

use super::{to_stream, ContentId, Stream, StreamRequest};

/// How a request ended, for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Streams,
    Empty,
    NoTitle,
    UnsupportedId,
    Cancelled,
}

impl Outcome {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Streams => "streams",
            Self::Empty => "empty",
            Self::NoTitle => "no_title",
            Self::UnsupportedId => "unsupported_id",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Resolves stream requests: title lookup, query generation, index search,
/// classification, ranking and presentation.
///
/// Every failure degrades to an empty list; nothing is surfaced to the caller.
pub struct StreamHandler {
    searcher: Arc<dyn Searcher>,
    resolver: Arc<dyn TitleResolver>,
    query_builder: QueryBuilder,
    options: SearchOptions,
    max_candidates: usize,
    policy: RankingPolicy,
}

impl StreamHandler {
    pub fn new(
        searcher: Arc<dyn Searcher>,
        resolver: Arc<dyn TitleResolver>,
        query_builder: QueryBuilder,
    ) -> Self {
        let config = Config::default();
        Self {
            searcher,
            resolver,
            query_builder,
            options: SearchOptions::from(&config.index),
            max_candidates: config.search.max_candidates,
            policy: config.ranking,
        }
    }

    /// Build a handler with the index options, cap and ranking policy from config.
    pub fn from_config(
        config: &Config,
        searcher: Arc<dyn Searcher>,
        resolver: Arc<dyn TitleResolver>,
    ) -> Self {
        Self {
            searcher,
            resolver,
            query_builder: QueryBuilder::new(Arc::new(config.alias_table())),
            options: SearchOptions::from(&config.index),
            max_candidates: config.search.max_candidates,
            policy: config.ranking.clone(),
        }
    }

    pub fn with_policy(mut self, policy: RankingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    /// Resolve a request to ranked streams. Never fails; the worst case is empty.
    ///
    /// `cancel` is checked before every index query.
    pub async fn get_streams(
        &self,
        request: &StreamRequest,
        cancel: &CancellationToken,
    ) -> Vec<Stream> {
        let start = Instant::now();
        let (outcome, streams) = self.run(request, cancel).await;

        metrics::STREAM_REQUESTS
            .with_label_values(&[outcome.as_str()])
            .inc();
        metrics::STREAM_REQUEST_DURATION
            .with_label_values(&[outcome.as_str()])
            .observe(start.elapsed().as_secs_f64());
        metrics::STREAMS_RETURNED
            .with_label_values(&[])
            .observe(streams.len() as f64);

        info!(
            content_type = %request.content_type,
            id = %request.id,
            outcome = outcome.as_str(),
            streams = streams.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Stream request complete"
        );

        streams
    }

    async fn run(
        &self,
        request: &StreamRequest,
        cancel: &CancellationToken,
    ) -> (Outcome, Vec<Stream>) {
        let Some(content_id) = ContentId::parse(&request.id) else {
            warn!(id = %request.id, "Unsupported content id");
            return (Outcome::UnsupportedId, Vec::new());
        };

        let Some(title) = self.resolve_title(request, &content_id).await else {
            debug!(id = %request.id, "No title found, skipping search");
            return (Outcome::NoTitle, Vec::new());
        };

        let queries = self
            .query_builder
            .build(&title, request.search_episode(&content_id));
        metrics::QUERIES_GENERATED
            .with_label_values(&[])
            .observe(queries.len() as f64);
        debug!(title = %title, queries = ?queries, "Generated search queries");

        let aggregation = aggregate_candidates(
            self.searcher.as_ref(),
            &queries,
            &self.options,
            self.max_candidates,
            cancel,
        )
        .await;
        metrics::CANDIDATES_FOUND
            .with_label_values(&[])
            .observe(aggregation.candidates.len() as f64);

        if aggregation.stop_reason == StopReason::Cancelled {
            debug!(
                id = %request.id,
                queries_issued = aggregation.queries_issued,
                "Request cancelled"
            );
            return (Outcome::Cancelled, Vec::new());
        }

        let total = aggregation.candidates.len();
        let enriched = aggregation.candidates.into_iter().map(enrich).collect();
        let ranked = rank_candidates(enriched, &self.policy);

        debug!(
            title = %title,
            queries_issued = aggregation.queries_issued,
            failed_queries = aggregation.failed_queries,
            candidates = total,
            ranked = ranked.len(),
            "Candidates ranked"
        );

        let streams: Vec<Stream> = ranked.iter().map(to_stream).collect();
        let outcome = if streams.is_empty() {
            Outcome::Empty
        } else {
            Outcome::Streams
        };
        (outcome, streams)
    }

    /// Title from the request when the client sent one, else from the resolver.
    ///
    /// Resolver errors are logged and treated as "no title". The result is
    /// normalized; an empty normalized title counts as missing.
    async fn resolve_title(
        &self,
        request: &StreamRequest,
        content_id: &ContentId,
    ) -> Option<String> {
        let raw = match request.name.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(name) => name.to_string(),
            None => match self.resolver.resolve(content_id).await {
                Ok(Some(title)) => {
                    debug!(id = %content_id, title = %title, "Resolved title");
                    title
                }
                Ok(None) => return None,
                Err(e) => {
                    warn!(
                        id = %content_id,
                        resolver = self.resolver.name(),
                        error = %e,
                        "Title resolution failed"
                    );
                    return None;
                }
            },
        };

        let title = normalize_title(&raw);
        (!title.is_empty()).then_some(title)
    }
}
