//! Prometheus metrics for observability.
//!
//! This module provides the HTTP-level metrics of the addon server and
//! registers the pipeline metrics exported by the core crate:
//! - HTTP request metrics (latency, counts, in flight)
//! - Stream pipeline and external service metrics (from `nyaa_addon_core::metrics`)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use regex_lite::Regex;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "nyaa_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("nyaa_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "nyaa_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Core metrics (stream pipeline, index search, external services)
    for metric in nyaa_addon_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

static STREAM_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/stream/([^/]+)/[^/]+(/[^/]+)?$").unwrap());

/// Normalize a path for metric labels.
///
/// Stream paths carry content ids and free-form extras; both are replaced
/// with placeholders, as is any content type other than `movie` or `series`.
pub fn normalize_path(path: &str) -> String {
    let Some(caps) = STREAM_PATH.captures(path) else {
        return path.to_string();
    };

    let content_type = match caps.get(1).map(|m| m.as_str()) {
        Some(t @ ("movie" | "series")) => t,
        _ => "{type}",
    };

    if caps.get(2).is_some() {
        format!("/stream/{}/{{id}}/{{extra}}", content_type)
    } else {
        format!("/stream/{}/{{id}}", content_type)
    }
}
