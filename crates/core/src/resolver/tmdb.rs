//! TMDB (The Movie Database) resolver for IMDb identifiers.
//!
//! TMDB requires an API key for access.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{ResolveError, TitleResolver};
use crate::addon::ContentId;
use crate::config::TmdbConfig;
use crate::metrics;

/// TMDB `find` client.
pub struct TmdbResolver {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbResolver {
    /// Create a new TMDB resolver.
    pub fn new(config: TmdbConfig) -> Result<Self, ResolveError> {
        if config.api_key.is_empty() {
            return Err(ResolveError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Look up an IMDb id; movies win over TV shows.
    pub async fn find_by_imdb_id(&self, imdb_id: &str) -> Result<Option<String>, ResolveError> {
        let url = format!("{}/find/{}", self.base_url, urlencoding::encode(imdb_id));

        debug!("TMDB find: imdb_id={}", imdb_id);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("external_source", "imdb_id"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(ResolveError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolveError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let find: TmdbFindResponse = response.json().await.map_err(|e| {
            ResolveError::ParseError(format!("Failed to parse find response: {}", e))
        })?;

        Ok(find.into_title())
    }
}

#[async_trait]
impl TitleResolver for TmdbResolver {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn resolve(&self, id: &ContentId) -> Result<Option<String>, ResolveError> {
        let ContentId::Imdb { id: imdb_id, .. } = id else {
            return Err(ResolveError::NotConfigured(format!(
                "TMDB cannot resolve {} ids",
                id.source()
            )));
        };

        let start = Instant::now();
        let result = self.find_by_imdb_id(imdb_id).await;
        metrics::record_external_call(
            "tmdb",
            "find",
            start.elapsed().as_secs_f64(),
            result.is_ok(),
        );
        result
    }
}

// =============================================================================
// TMDB API response types
// =============================================================================

#[derive(Debug, Deserialize)]
struct TmdbFindResponse {
    #[serde(default)]
    movie_results: Vec<TmdbMovieResult>,
    #[serde(default)]
    tv_results: Vec<TmdbTvResult>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieResult {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbTvResult {
    #[serde(default)]
    name: Option<String>,
}

impl TmdbFindResponse {
    fn into_title(self) -> Option<String> {
        let title = match self.movie_results.into_iter().next() {
            Some(movie) => movie.title,
            None => self.tv_results.into_iter().next().and_then(|tv| tv.name),
        };
        title.filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_prefers_movie_results() {
        let response: TmdbFindResponse = serde_json::from_str(
            r#"{
                "movie_results": [{"id": 1, "title": "Jujutsu Kaisen 0"}],
                "tv_results": [{"id": 2, "name": "Jujutsu Kaisen"}]
            }"#,
        )
        .unwrap();
        assert_eq!(response.into_title().as_deref(), Some("Jujutsu Kaisen 0"));
    }

    #[test]
    fn test_find_falls_back_to_tv_results() {
        let response: TmdbFindResponse = serde_json::from_str(
            r#"{"movie_results": [], "tv_results": [{"id": 2, "name": "Frieren: Beyond Journey's End"}]}"#,
        )
        .unwrap();
        assert_eq!(
            response.into_title().as_deref(),
            Some("Frieren: Beyond Journey's End")
        );
    }

    #[test]
    fn test_find_no_results() {
        let response: TmdbFindResponse =
            serde_json::from_str(r#"{"movie_results": [], "person_results": []}"#).unwrap();
        assert_eq!(response.into_title(), None);
    }

    #[test]
    fn test_new_requires_api_key() {
        let result = TmdbResolver::new(TmdbConfig {
            api_key: String::new(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            timeout_secs: 5,
        });
        assert!(matches!(result, Err(ResolveError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn test_rejects_kitsu_ids() {
        let resolver = TmdbResolver::new(TmdbConfig {
            api_key: "key".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        let id = ContentId::parse("kitsu:1").unwrap();
        assert!(matches!(
            resolver.resolve(&id).await,
            Err(ResolveError::NotConfigured(_))
        ));
    }
}
