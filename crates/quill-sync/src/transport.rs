use async_trait::async_trait;

use quill_types::{Post, PostsData};

use crate::error::SyncResult;

/// Transport interface to the blog API.
///
/// Implementations perform exactly one retrieval per call: no retry, no
/// caching.
#[async_trait]
pub trait PostsSource: Send + Sync {
    /// Retrieve the full post collection in a single request.
    async fn fetch_all(&self) -> SyncResult<PostsData>;

    /// Retrieve one post by slug. `Ok(None)` when the API reports it missing.
    ///
    /// The default scans the full collection; sources with a dedicated
    /// endpoint override it.
    async fn fetch_post(&self, slug: &str) -> SyncResult<Option<Post>> {
        let data = self.fetch_all().await?;
        Ok(data.posts.into_iter().find(|p| p.slug == slug))
    }
}
