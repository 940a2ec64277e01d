use serde::{Deserialize, Serialize};

/// A single blog entry record exposed by the API.
///
/// `slug` is unique and URL-safe; `id` is server-assigned. `tags` is always a
/// decoded sequence once deserialized, whatever shape the transport used.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "crate::de::int::deserialize")]
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default, deserialize_with = "crate::de::text::deserialize")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "crate::de::text::deserialize")]
    pub content: String,
    #[serde(default, deserialize_with = "crate::de::text::deserialize")]
    pub featured_image: String,
    pub published_date: String,
    /// `None` for posts that were never edited.
    #[serde(default)]
    pub updated_date: Option<String>,
    #[serde(default, deserialize_with = "crate::tags::deserialize")]
    pub tags: Vec<String>,
}

impl Post {
    /// Returns `true` if the post carries `tag` (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Date part of `published_date`.
    pub fn published_day(&self) -> &str {
        crate::date::extract_date(&self.published_date)
    }
}

/// The page window described by a list response.
///
/// Not used for cache partitioning: the store always holds one full window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(deserialize_with = "crate::de::int::deserialize")]
    pub total: u64,
    #[serde(deserialize_with = "crate::de::int::deserialize")]
    pub page: u64,
    #[serde(deserialize_with = "crate::de::int::deserialize")]
    pub limit: u64,
    #[serde(rename = "lastPage", deserialize_with = "crate::de::int::deserialize")]
    pub last_page: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            limit: 10,
            last_page: 1,
        }
    }
}

/// Decoded payload of the post collection endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsData {
    pub posts: Vec<Post>,
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl PostsData {
    /// Find a post by slug.
    pub fn find(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// All slugs, in collection order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> + '_ {
        self.posts.iter().map(|p| p.slug.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire_post() -> serde_json::Value {
        json!({
            "id": "3",
            "title": "Hello World",
            "slug": "hello-world",
            "excerpt": "First post",
            "content": "<p>Hi</p>",
            "featured_image": null,
            "published_date": "2024-03-01 14:30:00",
            "updated_date": null,
            "tags": "[\"go\",\"rust\"]"
        })
    }

    #[test]
    fn decodes_database_shaped_row() {
        let post: Post = serde_json::from_value(wire_post()).unwrap();
        assert_eq!(post.id, 3);
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.featured_image, "");
        assert!(post.updated_date.is_none());
        assert_eq!(post.tags, vec!["go", "rust"]);
    }

    #[test]
    fn missing_tags_are_empty() {
        let mut raw = wire_post();
        raw.as_object_mut().unwrap().remove("tags");
        let post: Post = serde_json::from_value(raw).unwrap();
        assert!(post.tags.is_empty());
    }

    #[test]
    fn missing_slug_is_rejected() {
        let mut raw = wire_post();
        raw.as_object_mut().unwrap().remove("slug");
        assert!(serde_json::from_value::<Post>(raw).is_err());
    }

    #[test]
    fn serialized_post_decodes_unchanged() {
        let post: Post = serde_json::from_value(wire_post()).unwrap();
        let again: Post = serde_json::from_str(&serde_json::to_string(&post).unwrap()).unwrap();
        assert_eq!(post, again);
    }

    #[test]
    fn has_tag_and_published_day() {
        let post: Post = serde_json::from_value(wire_post()).unwrap();
        assert!(post.has_tag("rust"));
        assert!(!post.has_tag("Rust"));
        assert_eq!(post.published_day(), "2024-03-01");
    }

    #[test]
    fn pagination_uses_wire_names() {
        let p: Pagination =
            serde_json::from_value(json!({"total": "12", "page": 1, "limit": 100, "lastPage": 1.0}))
                .unwrap();
        assert_eq!(p.total, 12);
        assert_eq!(p.last_page, 1);
        let out = serde_json::to_value(p).unwrap();
        assert!(out.get("lastPage").is_some());
    }

    #[test]
    fn pagination_default_matches_initial_state() {
        let p = Pagination::default();
        assert_eq!((p.total, p.page, p.limit, p.last_page), (0, 1, 10, 1));
    }

    #[test]
    fn posts_data_payload() {
        let data: PostsData = serde_json::from_value(json!({
            "posts": [wire_post()],
            "pagination": {"total": 1, "page": 1, "limit": 100, "lastPage": 1},
            "timestamp": 1709300000,
            "status": "success"
        }))
        .unwrap();
        assert_eq!(data.posts.len(), 1);
        assert_eq!(data.find("hello-world").map(|p| p.id), Some(3));
        assert!(data.find("nope").is_none());
        assert_eq!(data.slugs().collect::<Vec<_>>(), vec!["hello-world"]);
        assert_eq!(data.status.as_deref(), Some("success"));
    }

    #[test]
    fn posts_data_requires_posts() {
        assert!(serde_json::from_value::<PostsData>(json!({"status": "success"})).is_err());
    }
}
