//! Stremio stream endpoint.
//!
//! Both `/stream/{type}/{id}.json` and `/stream/{type}/{id}/{extra}.json` land
//! here. The response is always `200 {"streams": [...]}`; anything the addon
//! cannot serve yields an empty list.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use nyaa_addon_core::{ContentType, Stream, StreamRequest};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StreamsResponse {
    pub streams: Vec<Stream>,
}

fn strip_json(segment: &str) -> &str {
    segment.strip_suffix(".json").unwrap_or(segment)
}

/// Pull the `name` entry out of a `key=value&key=value` extra segment.
///
/// Path segments arrive percent-decoded already.
pub fn extra_name(extra: &str) -> Option<String> {
    extra
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "name")
        .map(|(_, value)| value.trim().to_string())
        .filter(|name| !name.is_empty())
}

pub async fn get_streams(
    State(state): State<Arc<AppState>>,
    Path((content_type, file)): Path<(String, String)>,
) -> Json<StreamsResponse> {
    resolve(&state, &content_type, strip_json(&file), None).await
}

pub async fn get_streams_with_extra(
    State(state): State<Arc<AppState>>,
    Path((content_type, id, extra)): Path<(String, String, String)>,
) -> Json<StreamsResponse> {
    resolve(&state, &content_type, &id, Some(strip_json(&extra))).await
}

async fn resolve(
    state: &AppState,
    content_type: &str,
    id: &str,
    extra: Option<&str>,
) -> Json<StreamsResponse> {
    let Some(content_type) = ContentType::parse(content_type) else {
        debug!(content_type, "Unsupported content type");
        return Json(StreamsResponse {
            streams: Vec::new(),
        });
    };

    let mut request = StreamRequest::new(content_type, id);
    if let Some(name) = extra.and_then(extra_name) {
        request = request.with_name(name);
    }

    // Cancelled when this future is dropped, e.g. on client disconnect
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let streams = state.handler().get_streams(&request, &cancel).await;
    Json(StreamsResponse { streams })
}
