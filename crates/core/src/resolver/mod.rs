//! Title resolution for Stremio identifiers.
//!
//! IMDb ids are resolved through TMDB's `find` endpoint, Kitsu ids through
//! the Kitsu anime API. Resolvers return the raw catalog title; callers
//! normalize it before searching.

mod kitsu;
mod tmdb;

pub use kitsu::KitsuResolver;
pub use tmdb::TmdbResolver;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::addon::ContentId;

/// Errors that can occur when resolving an identifier to a title.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// No backend configured for this identifier (missing API key, etc.).
    #[error("Resolver not configured: {0}")]
    NotConfigured(String),
}

/// Turns a content identifier into a searchable title.
#[async_trait]
pub trait TitleResolver: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Resolve an identifier. `Ok(None)` means the catalog has no title for it.
    async fn resolve(&self, id: &ContentId) -> Result<Option<String>, ResolveError>;
}

/// Dispatches identifiers to the backend for their prefix.
pub struct CombinedResolver {
    imdb: Option<Arc<dyn TitleResolver>>,
    kitsu: Option<Arc<dyn TitleResolver>>,
}

impl CombinedResolver {
    /// Create a combined resolver with optional backends.
    pub fn new(
        imdb: Option<Arc<dyn TitleResolver>>,
        kitsu: Option<Arc<dyn TitleResolver>>,
    ) -> Self {
        Self { imdb, kitsu }
    }

    /// Check if IMDb resolution is available.
    pub fn has_imdb(&self) -> bool {
        self.imdb.is_some()
    }

    /// Check if Kitsu resolution is available.
    pub fn has_kitsu(&self) -> bool {
        self.kitsu.is_some()
    }
}

#[async_trait]
impl TitleResolver for CombinedResolver {
    fn name(&self) -> &str {
        "combined"
    }

    async fn resolve(&self, id: &ContentId) -> Result<Option<String>, ResolveError> {
        let backend = match id {
            ContentId::Imdb { .. } => &self.imdb,
            ContentId::Kitsu { .. } => &self.kitsu,
        };

        match backend {
            Some(resolver) => resolver.resolve(id).await,
            None => Err(ResolveError::NotConfigured(format!(
                "no {} resolver configured",
                id.source()
            ))),
        }
    }
}
