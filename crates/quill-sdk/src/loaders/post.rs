use serde::Serialize;
use tracing::warn;

use quill_types::Post;

use crate::context::BlogContext;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostPage {
    pub slug: String,
    pub post: Option<Post>,
}

/// One route parameter set for static generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostEntry {
    pub slug: String,
}

/// Single-post loader. `post` is `None` when the slug is unknown or nothing
/// could be loaded; the store's `error` tells those apart.
pub async fn load_post(ctx: &BlogContext, slug: &str) -> PostPage {
    ctx.ensure_loaded().await;
    PostPage {
        slug: slug.to_string(),
        post: ctx.store().get_post_by_slug(slug),
    }
}

/// Enumerate every post slug.
///
/// Never fails: enumerates whatever posts the store holds, which is nothing
/// until a load has succeeded. A refresh started by another caller, or a
/// failed one, leaves the previous posts enumerable.
pub async fn post_entries(ctx: &BlogContext) -> Vec<PostEntry> {
    let outcome = ctx.ensure_loaded().await;
    let entries: Vec<PostEntry> = ctx
        .store()
        .snapshot()
        .data
        .slugs()
        .map(|slug| PostEntry {
            slug: slug.to_string(),
        })
        .collect();
    if entries.is_empty() && outcome.is_failure() {
        warn!(?outcome, "no posts loaded; enumerating no entries");
    }
    entries
}
