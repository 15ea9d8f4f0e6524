//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Stream requests (outcome, duration, queries generated)
//! - Index searches (queries issued, failures, results per query)
//! - Title resolution backends (TMDB, Kitsu)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Stream Requests
// =============================================================================

/// Stream requests total by outcome.
pub static STREAM_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("nyaa_stream_requests_total", "Total stream requests"),
        &["outcome"], // "streams", "empty", "no_title", "unsupported_id", "cancelled"
    )
    .unwrap()
});

/// Stream request duration in seconds.
pub static STREAM_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "nyaa_stream_request_duration_seconds",
            "Duration of stream resolution",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["outcome"],
    )
    .unwrap()
});

/// Queries generated per stream request.
pub static QUERIES_GENERATED: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "nyaa_queries_generated",
            "Number of search queries generated per stream request",
        )
        .buckets(vec![1.0, 2.0, 4.0, 7.0, 10.0, 20.0, 40.0]),
        &[],
    )
    .unwrap()
});

/// Distinct candidates collected per stream request.
pub static CANDIDATES_FOUND: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "nyaa_candidates_found",
            "Number of distinct candidates collected per stream request",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 20.0, 30.0, 50.0, 100.0]),
        &[],
    )
    .unwrap()
});

/// Streams returned per stream request.
pub static STREAMS_RETURNED: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "nyaa_streams_returned",
            "Number of streams returned per stream request",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 20.0, 50.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// Index Searches
// =============================================================================

/// Index queries dispatched.
pub static SEARCH_QUERIES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("nyaa_search_queries_total", "Total index queries dispatched").unwrap()
});

/// Index queries that failed (network, HTTP status or parse).
pub static SEARCH_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "nyaa_search_failures_total",
        "Total index queries that failed",
    )
    .unwrap()
});

/// Rows returned per index query.
pub static SEARCH_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "nyaa_search_results",
            "Number of rows returned per index query",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 75.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service request duration.
pub static EXTERNAL_SERVICE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "nyaa_external_service_duration_seconds",
            "Duration of external service calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 15.0]),
        &["service", "operation"],
    )
    .unwrap()
});

/// External service requests total.
pub static EXTERNAL_SERVICE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "nyaa_external_service_requests_total",
            "Total external service requests",
        ),
        &["service", "operation", "status"], // status: "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Record the outcome of one external call.
pub fn record_external_call(service: &str, operation: &str, seconds: f64, success: bool) {
    EXTERNAL_SERVICE_DURATION
        .with_label_values(&[service, operation])
        .observe(seconds);
    EXTERNAL_SERVICE_REQUESTS
        .with_label_values(&[service, operation, if success { "success" } else { "error" }])
        .inc();
}

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Stream requests
        Box::new(STREAM_REQUESTS.clone()),
        Box::new(STREAM_REQUEST_DURATION.clone()),
        Box::new(QUERIES_GENERATED.clone()),
        Box::new(CANDIDATES_FOUND.clone()),
        Box::new(STREAMS_RETURNED.clone()),
        // Index
        Box::new(SEARCH_QUERIES.clone()),
        Box::new(SEARCH_FAILURES.clone()),
        Box::new(SEARCH_RESULTS.clone()),
        // External services
        Box::new(EXTERNAL_SERVICE_DURATION.clone()),
        Box::new(EXTERNAL_SERVICE_REQUESTS.clone()),
    ]
}
