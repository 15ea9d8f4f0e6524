//! Kitsu anime API resolver.
//!
//! Kitsu needs no API key.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{ResolveError, TitleResolver};
use crate::addon::ContentId;
use crate::config::KitsuConfig;
use crate::metrics;

/// Kitsu anime lookup client.
pub struct KitsuResolver {
    client: Client,
    base_url: String,
}

impl KitsuResolver {
    pub fn new(config: KitsuConfig) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch an anime by Kitsu id and pick its display title.
    pub async fn get_anime_title(&self, kitsu_id: &str) -> Result<Option<String>, ResolveError> {
        let url = format!("{}/anime/{}", self.base_url, urlencoding::encode(kitsu_id));

        debug!("Kitsu get anime: id={}", kitsu_id);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.api+json")
            .send()
            .await?;

        let status = response.status();
        if status == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolveError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let anime: KitsuAnimeResponse = response.json().await.map_err(|e| {
            ResolveError::ParseError(format!("Failed to parse anime response: {}", e))
        })?;

        Ok(anime.data.attributes.display_title())
    }
}

#[async_trait]
impl TitleResolver for KitsuResolver {
    fn name(&self) -> &str {
        "kitsu"
    }

    async fn resolve(&self, id: &ContentId) -> Result<Option<String>, ResolveError> {
        let ContentId::Kitsu { id: kitsu_id, .. } = id else {
            return Err(ResolveError::NotConfigured(format!(
                "Kitsu cannot resolve {} ids",
                id.source()
            )));
        };

        let start = Instant::now();
        let result = self.get_anime_title(kitsu_id).await;
        metrics::record_external_call(
            "kitsu",
            "get_anime",
            start.elapsed().as_secs_f64(),
            result.is_ok(),
        );
        result
    }
}

// =============================================================================
// Kitsu API response types
// =============================================================================

#[derive(Debug, Deserialize)]
struct KitsuAnimeResponse {
    data: KitsuAnimeData,
}

#[derive(Debug, Deserialize)]
struct KitsuAnimeData {
    attributes: KitsuAnimeAttributes,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KitsuAnimeAttributes {
    #[serde(default)]
    titles: KitsuTitles,
    #[serde(default)]
    canonical_title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct KitsuTitles {
    #[serde(default)]
    en: Option<String>,
    #[serde(default)]
    en_jp: Option<String>,
}

impl KitsuAnimeAttributes {
    /// English title, then romanized, then canonical. Empty strings are skipped.
    fn display_title(self) -> Option<String> {
        [self.titles.en, self.titles.en_jp, self.canonical_title]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Option<String> {
        let response: KitsuAnimeResponse = serde_json::from_str(json).unwrap();
        response.data.attributes.display_title()
    }

    #[test]
    fn test_prefers_english_title() {
        let title = parse(
            r#"{"data": {"id": "46474", "type": "anime", "attributes": {
                "titles": {"en": "Frieren: Beyond Journey's End", "en_jp": "Sousou no Frieren", "ja_jp": "葬送のフリーレン"},
                "canonicalTitle": "Sousou no Frieren"
            }}}"#,
        );
        assert_eq!(title.as_deref(), Some("Frieren: Beyond Journey's End"));
    }

    #[test]
    fn test_falls_back_to_romanized_then_canonical() {
        let title = parse(
            r#"{"data": {"attributes": {"titles": {"en_jp": "Sousou no Frieren"}, "canonicalTitle": "Canonical"}}}"#,
        );
        assert_eq!(title.as_deref(), Some("Sousou no Frieren"));

        let title = parse(
            r#"{"data": {"attributes": {"titles": {"en": "", "ja_jp": "x"}, "canonicalTitle": "Canonical"}}}"#,
        );
        assert_eq!(title.as_deref(), Some("Canonical"));
    }

    #[test]
    fn test_no_titles() {
        assert_eq!(parse(r#"{"data": {"attributes": {"titles": {}}}}"#), None);
    }

    #[test]
    fn test_new_with_defaults() {
        assert!(KitsuResolver::new(KitsuConfig::default()).is_ok());
    }
}
