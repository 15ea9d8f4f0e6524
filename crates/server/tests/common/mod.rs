//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock dependencies injected, enabling end-to-end testing of the addon
//! routes without reaching nyaa.si, TMDB or Kitsu.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use nyaa_addon_core::{
    load_config_from_str,
    testing::{MockResolver, MockSearcher},
    Searcher, StreamHandler, TitleResolver,
};
use nyaa_addon_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use nyaa_addon_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process router with fully controllable mocks for:
/// - Index search (MockSearcher)
/// - Title resolution (MockResolver)
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_stream_lookup() {
///     let fixture = TestFixture::new();
///     fixture.resolver.set_title("tt21209876", "Frieren").await;
///
///     let response = fixture.get("/stream/series/tt21209876:1:3.json").await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock searcher - configure index results
    pub searcher: Arc<MockSearcher>,
    /// Mock resolver - configure titles per id
    pub resolver: Arc<MockResolver>,
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// Build a fixture from a TOML config snippet.
    pub fn with_config(toml: &str) -> Self {
        let config = load_config_from_str(toml).expect("Failed to parse test config");

        let searcher = Arc::new(MockSearcher::new());
        let resolver = Arc::new(MockResolver::new());

        let handler = StreamHandler::from_config(
            &config,
            Arc::clone(&searcher) as Arc<dyn Searcher>,
            Arc::clone(&resolver) as Arc<dyn TitleResolver>,
        );
        let state = Arc::new(AppState::new(config, Arc::new(handler)));

        Self {
            router: create_router(state),
            searcher,
            resolver,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::builder().method("GET").uri(path)).await
    }

    pub async fn get_with_origin(&self, path: &str, origin: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method("GET")
                .uri(path)
                .header("Origin", origin),
        )
        .await
    }

    async fn request(&self, builder: axum::http::request::Builder) -> TestResponse {
        let request = builder.body(Body::empty()).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}
