//! Function-style helpers over a [`BlogContext`], for callers that want the
//! data without a page shape around it.

use std::sync::Arc;

use quill_protocol::PostEnvelope;
use quill_types::PostsData;

use crate::context::BlogContext;

/// The cached collection, fetching it first if needed.
///
/// On failure this is whatever was last loaded, possibly the empty initial
/// collection.
pub async fn fetch_posts(ctx: &BlogContext) -> Arc<PostsData> {
    ctx.ensure_loaded().await;
    Arc::clone(&ctx.store().snapshot().data)
}

/// Look up one post, wrapped the way the API wraps single-post responses:
/// status `"success"` with the post, or `"error"` with none.
pub async fn fetch_post_by_slug(ctx: &BlogContext, slug: &str) -> PostEnvelope {
    ctx.ensure_loaded().await;
    PostEnvelope::from_lookup(ctx.store().get_post_by_slug(slug))
}
