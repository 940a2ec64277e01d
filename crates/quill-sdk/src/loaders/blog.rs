use serde::Serialize;

use quill_types::Post;

use crate::context::BlogContext;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlogIndexPage {
    pub page: usize,
    pub last_page: usize,
    pub posts: Vec<Post>,
}

/// Parse a `page` query parameter. Leading digits are taken, so `"3abc"` is
/// page 3; anything missing, non-numeric or zero is page 1.
pub fn parse_page(param: Option<&str>) -> usize {
    let Some(raw) = param else { return 1 };
    let raw = raw.trim();
    let digits = raw
        .find(|c: char| !c.is_ascii_digit())
        .map_or(raw, |end| &raw[..end]);
    match digits.parse::<usize>() {
        Ok(page) if page > 0 => page,
        _ => 1,
    }
}

/// Blog index loader.
///
/// Pages are windows of `posts_per_page` over the cached collection. A page
/// past the end yields an empty window rather than an error.
pub async fn load_blog_index(ctx: &BlogContext, page_param: Option<&str>) -> BlogIndexPage {
    ctx.ensure_loaded().await;

    let per_page = ctx.site().posts_per_page.max(1);
    let page = parse_page(page_param);
    let state = ctx.store().snapshot();
    let posts = state.posts();

    let last_page = posts.len().div_ceil(per_page).max(1);
    let window = posts
        .iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .cloned()
        .collect();

    BlogIndexPage {
        page,
        last_page,
        posts: window,
    }
}
