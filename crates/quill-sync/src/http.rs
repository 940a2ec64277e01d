use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use tracing::debug;

use quill_protocol::{decode_post, decode_posts, list_posts_url, post_url, ErrorEnvelope};
use quill_types::{Post, PostsData};

use crate::config::TransportConfig;
use crate::error::{SyncError, SyncResult};
use crate::transport::PostsSource;

/// [`PostsSource`] backed by the blog HTTP API.
pub struct HttpPostsSource {
    client: Client,
    config: TransportConfig,
}

impl HttpPostsSource {
    pub fn new(config: TransportConfig) -> SyncResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| SyncError::ClientSetup(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Issue a GET and return the status with the full body.
    async fn get(&self, url: &str) -> SyncResult<(StatusCode, Vec<u8>)> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "response received");
        Ok((status, body.to_vec()))
    }
}

fn cache_buster() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

fn status_error(status: StatusCode, body: &[u8]) -> SyncError {
    SyncError::Status {
        status: status.as_u16(),
        message: ErrorEnvelope::parse(body).map(|e| e.message),
    }
}

#[async_trait]
impl PostsSource for HttpPostsSource {
    async fn fetch_all(&self) -> SyncResult<PostsData> {
        let url = list_posts_url(&self.config.base_url, self.config.page_limit, cache_buster())?;
        let (status, body) = self.get(&url).await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        decode_posts(&body).map_err(|e| SyncError::Decode(e.to_string()))
    }

    async fn fetch_post(&self, slug: &str) -> SyncResult<Option<Post>> {
        let url = post_url(&self.config.base_url, slug)?;
        let (status, body) = self.get(&url).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        let envelope = decode_post(&body).map_err(|e| SyncError::Decode(e.to_string()))?;
        Ok(envelope.post)
    }
}

impl std::fmt::Debug for HttpPostsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPostsSource")
            .field("base_url", &self.config.base_url)
            .field("page_limit", &self.config.page_limit)
            .finish()
    }
}
