use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::{Catalog, ContentType};
use crate::services::{CatalogSource, EngineSettings, Recommender};

/// Bounds on the `count` field of recommendation requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountLimits {
    pub default_count: usize,
    pub max_count: usize,
}

impl Default for CountLimits {
    fn default() -> Self {
        Self {
            default_count: 5,
            max_count: 50,
        }
    }
}

impl CountLimits {
    /// Applies the default to a missing count and rejects counts above the max
    pub fn resolve(&self, count: Option<usize>) -> AppResult<usize> {
        let count = count.unwrap_or(self.default_count);
        if count > self.max_count {
            return Err(AppError::InvalidInput(format!(
                "count {} exceeds the maximum of {}",
                count, self.max_count
            )));
        }
        Ok(count)
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
    source: Arc<dyn CatalogSource>,
    settings: EngineSettings,
    limits: CountLimits,
}

/// The active session, replaced wholesale on catalog switch
pub struct AppStateInner {
    pub content_type: ContentType,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    /// Loads the initial catalog from `source` and prepares a session for it
    pub async fn load(
        source: Arc<dyn CatalogSource>,
        settings: EngineSettings,
        content_type: ContentType,
        limits: CountLimits,
    ) -> AppResult<Self> {
        let recommender = build_session(source.as_ref(), settings, content_type).await?;
        Ok(Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                content_type,
                recommender: Arc::new(recommender),
            })),
            source,
            settings,
            limits,
        })
    }

    pub fn limits(&self) -> CountLimits {
        self.limits
    }

    /// Snapshot of the active session; stays valid across a concurrent reload
    pub async fn session(&self) -> (ContentType, Arc<Recommender>) {
        let inner = self.inner.read().await;
        (inner.content_type, Arc::clone(&inner.recommender))
    }

    /// Loads and prepares a new catalog, then swaps it in
    ///
    /// The catalog is loaded and fitted before the write lock is taken, so
    /// readers keep using the previous session until the swap.
    pub async fn reload(&self, content_type: ContentType) -> AppResult<Arc<Recommender>> {
        let recommender =
            Arc::new(build_session(self.source.as_ref(), self.settings, content_type).await?);

        let mut inner = self.inner.write().await;
        inner.content_type = content_type;
        inner.recommender = Arc::clone(&recommender);

        tracing::info!(content_type = %content_type, "Switched active catalog");
        Ok(recommender)
    }
}

async fn build_session(
    source: &dyn CatalogSource,
    settings: EngineSettings,
    content_type: ContentType,
) -> AppResult<Recommender> {
    let items = source.load(content_type).await?;
    let catalog = Catalog::from_items(items);
    if catalog.is_empty() {
        tracing::warn!(
            source = source.name(),
            content_type = %content_type,
            "Loaded an empty catalog"
        );
    }
    Ok(Recommender::new(catalog, settings))
}
