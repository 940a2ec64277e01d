use std::sync::Arc;

use quill_store::PostStore;
use quill_sync::{FetchCoordinator, FetchOutcome, HttpPostsSource, PostsSource};

use crate::config::{ClientConfig, SiteConfig};
use crate::error::SdkResult;

/// One isolated blog data context: a post store, the coordinator that fills
/// it, and the site settings loaders need.
///
/// Cloning is cheap and every clone shares the same store. Loaders take the
/// context explicitly; there is no process-wide instance.
#[derive(Clone, Debug)]
pub struct BlogContext {
    coordinator: FetchCoordinator,
    site: Arc<SiteConfig>,
}

impl BlogContext {
    /// Context with an empty store fed by `source`.
    pub fn new(source: Arc<dyn PostsSource>, site: SiteConfig) -> Self {
        Self::with_store(Arc::new(PostStore::new()), source, site)
    }

    /// Context over an existing (possibly pre-seeded) store.
    pub fn with_store(store: Arc<PostStore>, source: Arc<dyn PostsSource>, site: SiteConfig) -> Self {
        Self {
            coordinator: FetchCoordinator::new(store, source),
            site: Arc::new(site),
        }
    }

    /// Context talking HTTP to the API described by `config`.
    pub fn from_config(config: &ClientConfig) -> SdkResult<Self> {
        let source = HttpPostsSource::new(config.api.clone())?;
        Ok(Self::new(Arc::new(source), config.site.clone()))
    }

    pub fn store(&self) -> &Arc<PostStore> {
        self.coordinator.store()
    }

    pub fn coordinator(&self) -> &FetchCoordinator {
        &self.coordinator
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Wait until the store is populated (or the fetch has failed).
    pub async fn ensure_loaded(&self) -> FetchOutcome {
        self.coordinator.fetch_all_posts().await
    }
}
