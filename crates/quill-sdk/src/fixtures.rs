use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quill_sync::{PostsSource, SyncError, SyncResult};
use quill_types::{Pagination, Post, PostsData};

pub fn post(id: i64, slug: &str, tags: &[&str]) -> Post {
    Post {
        id,
        title: format!("Post {id}"),
        slug: slug.into(),
        excerpt: format!("Excerpt {id}"),
        content: format!("<p>Content {id}</p>"),
        featured_image: String::new(),
        published_date: format!("2024-03-{id:02} 14:30:00"),
        updated_date: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn sample_data() -> PostsData {
    PostsData {
        posts: vec![
            post(1, "hello-world", &["rust", "intro"]),
            post(2, "async-rust", &["rust", "async"]),
            post(3, "go-vs-rust", &["go", "rust"]),
            post(4, "c-sharp-notes", &["c#"]),
            post(5, "plain", &[]),
        ],
        pagination: Pagination {
            total: 5,
            page: 1,
            limit: 100,
            last_page: 1,
        },
        timestamp: Some(1_709_300_000),
        status: Some("success".into()),
    }
}

/// In-process source replaying scripted results; once the script runs out
/// it keeps answering with a network error.
pub struct FixtureSource {
    results: Mutex<VecDeque<SyncResult<PostsData>>>,
    calls: AtomicUsize,
}

impl FixtureSource {
    pub fn scripted(results: Vec<SyncResult<PostsData>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn ok(data: PostsData) -> Self {
        Self::scripted(vec![Ok(data)])
    }

    pub fn failing(message: &str) -> Self {
        Self::scripted(vec![Err(SyncError::Network(message.into()))])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostsSource for FixtureSource {
    async fn fetch_all(&self) -> SyncResult<PostsData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SyncError::Network("unreachable".into())))
    }
}
