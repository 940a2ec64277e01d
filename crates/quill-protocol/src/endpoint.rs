use crate::error::{ProtocolError, ProtocolResult};

/// Page size requested for the full collection.
///
/// The client always asks for one large page. Collections larger than this
/// are truncated to the newest `DEFAULT_PAGE_LIMIT` posts; there is no
/// pagination fallback.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// HTTP endpoint paths of the blog API, relative to the base URL.
pub mod endpoints {
    pub const POSTS: &str = "/posts";
    /// Query parameter carrying the cache-buster.
    pub const CACHE_BUSTER_PARAM: &str = "_";
    pub const LIMIT_PARAM: &str = "limit";
}

fn normalized_base(base: &str) -> ProtocolResult<&str> {
    let trimmed = base.trim().trim_end_matches('/');
    let valid = trimmed.split_once("://").is_some_and(|(scheme, rest)| {
        (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"))
            && !rest.is_empty()
    });
    if valid {
        Ok(trimmed)
    } else {
        Err(ProtocolError::InvalidBaseUrl(base.to_string()))
    }
}

/// `GET {base}/posts?limit={limit}&_={cache_buster}`
pub fn list_posts_url(base: &str, limit: u32, cache_buster: u128) -> ProtocolResult<String> {
    let base = normalized_base(base)?;
    Ok(format!(
        "{base}{}?{}={limit}&{}={cache_buster}",
        endpoints::POSTS,
        endpoints::LIMIT_PARAM,
        endpoints::CACHE_BUSTER_PARAM,
    ))
}

/// `GET {base}/posts/{slug}`, with the slug percent-encoded.
pub fn post_url(base: &str, slug: &str) -> ProtocolResult<String> {
    let base = normalized_base(base)?;
    if slug.is_empty() {
        return Err(ProtocolError::EmptySlug);
    }
    Ok(format!("{base}{}/{}", endpoints::POSTS, urlencoding::encode(slug)))
}
