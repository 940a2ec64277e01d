use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use quill_types::Post;

use crate::context::BlogContext;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagSummary {
    pub name: String,
    /// Percent-encoded form of `name`, usable as a path segment.
    pub slug: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagsPage {
    pub tags: Vec<TagSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagPage {
    /// The decoded tag name.
    pub slug: String,
    pub posts: Vec<Post>,
}

/// Every tag in use with its post count, sorted by name.
pub async fn load_tags(ctx: &BlogContext) -> TagsPage {
    ctx.ensure_loaded().await;
    let state = ctx.store().snapshot();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for post in state.posts() {
        for tag in &post.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    let tags = counts
        .into_iter()
        .map(|(name, count)| TagSummary {
            name: name.to_string(),
            slug: urlencoding::encode(name).into_owned(),
            count,
        })
        .collect();
    TagsPage { tags }
}

/// Posts carrying one tag. `raw_slug` is percent-decoded first; a slug that
/// does not decode to UTF-8 is matched as given.
pub async fn load_tag(ctx: &BlogContext, raw_slug: &str) -> TagPage {
    ctx.ensure_loaded().await;

    let slug = match urlencoding::decode(raw_slug) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            warn!(raw_slug, error = %e, "tag slug is not valid percent-encoding");
            raw_slug.to_string()
        }
    };

    let posts = ctx
        .store()
        .snapshot()
        .posts()
        .iter()
        .filter(|p| p.has_tag(&slug))
        .cloned()
        .collect();
    TagPage { slug, posts }
}
