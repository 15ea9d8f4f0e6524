//! Mock title resolver for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::addon::ContentId;
use crate::resolver::{ResolveError, TitleResolver};

/// Mock implementation of the TitleResolver trait.
///
/// Titles are keyed by the bare catalog id (`tt0388629`, `46474`), so one
/// mock answers every episode of a show.
#[derive(Debug, Clone, Default)]
pub struct MockResolver {
    /// Configured titles by bare id.
    titles: Arc<RwLock<HashMap<String, String>>>,
    /// Ids passed to `resolve`, in call order.
    calls: Arc<RwLock<Vec<ContentId>>>,
    /// If set, the next resolve will fail with this error.
    next_error: Arc<RwLock<Option<ResolveError>>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the title returned for an id.
    pub async fn set_title(&self, id: &str, title: &str) {
        self.titles
            .write()
            .await
            .insert(id.to_string(), title.to_string());
    }

    /// Configure the next resolve to fail with the given error.
    pub async fn set_next_error(&self, error: ResolveError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get the ids that were resolved.
    pub async fn recorded_calls(&self) -> Vec<ContentId> {
        self.calls.read().await.clone()
    }

    /// Get the number of resolve calls.
    pub async fn resolve_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl TitleResolver for MockResolver {
    fn name(&self) -> &str {
        "mock"
    }

    async fn resolve(&self, id: &ContentId) -> Result<Option<String>, ResolveError> {
        self.calls.write().await.push(id.clone());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        Ok(self.titles.read().await.get(id.id()).cloned())
    }
}
