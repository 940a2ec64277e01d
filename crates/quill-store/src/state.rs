use std::sync::Arc;

use quill_types::{Post, PostsData};

/// Cached, shared representation of the post collection and its load status.
///
/// `data` sits behind an `Arc` so snapshots handed to observers and loaders
/// are cheap; a successful load swaps the pointer rather than mutating posts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreState {
    pub is_loaded: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub data: Arc<PostsData>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            is_loaded: false,
            is_loading: false,
            error: None,
            data: Arc::new(PostsData::default()),
        }
    }
}

impl StoreState {
    /// A clean load is cached: no network access is needed.
    pub fn is_ready(&self) -> bool {
        self.is_loaded && self.error.is_none()
    }

    pub fn posts(&self) -> &[Post] {
        &self.data.posts
    }

    /// Transition taken when a fetch starts. Previous data stays visible.
    pub fn begin_loading(&self) -> Self {
        Self {
            is_loaded: false,
            is_loading: true,
            error: self.error.clone(),
            data: Arc::clone(&self.data),
        }
    }

    /// Transition taken on a successful fetch.
    pub fn finish_loaded(&self, data: PostsData) -> Self {
        Self {
            is_loaded: true,
            is_loading: false,
            error: None,
            data: Arc::new(data),
        }
    }

    /// Transition taken on a failed fetch.
    ///
    /// `was_loaded` is the `is_loaded` flag from before the fetch started, so
    /// a failed refresh does not invalidate an earlier success.
    pub fn finish_failed(&self, message: impl Into<String>, was_loaded: bool) -> Self {
        Self {
            is_loaded: was_loaded,
            is_loading: false,
            error: Some(message.into()),
            data: Arc::clone(&self.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str) -> Post {
        Post {
            id: 1,
            title: slug.into(),
            slug: slug.into(),
            excerpt: String::new(),
            content: String::new(),
            featured_image: String::new(),
            published_date: "2024-01-01 00:00:00".into(),
            updated_date: None,
            tags: vec![],
        }
    }

    #[test]
    fn initial_state() {
        let s = StoreState::default();
        assert!(!s.is_loaded);
        assert!(!s.is_loading);
        assert!(s.error.is_none());
        assert!(s.posts().is_empty());
        assert_eq!(s.data.pagination.limit, 10);
        assert!(!s.is_ready());
    }

    #[test]
    fn loading_never_coexists_with_loaded() {
        let loaded = StoreState::default().finish_loaded(PostsData::default());
        let loading = loaded.begin_loading();
        assert!(loading.is_loading);
        assert!(!loading.is_loaded);
    }

    #[test]
    fn success_clears_error() {
        let failed = StoreState::default()
            .begin_loading()
            .finish_failed("boom", false);
        assert_eq!(failed.error.as_deref(), Some("boom"));
        let ok = failed.begin_loading().finish_loaded(PostsData::default());
        assert!(ok.is_ready());
        assert!(ok.error.is_none());
    }

    #[test]
    fn failure_keeps_data_and_prior_loaded_flag() {
        let data = PostsData {
            posts: vec![post("a"), post("b")],
            ..Default::default()
        };
        let loaded = StoreState::default().finish_loaded(data);
        let failed = loaded.begin_loading().finish_failed("API error: 500", true);
        assert!(failed.is_loaded);
        assert!(!failed.is_loading);
        assert_eq!(failed.posts().len(), 2);
        assert!(Arc::ptr_eq(&failed.data, &loaded.data));
        assert!(!failed.is_ready());
    }
}
