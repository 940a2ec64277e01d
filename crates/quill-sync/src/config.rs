use serde::{Deserialize, Serialize};

use quill_protocol::DEFAULT_PAGE_LIMIT;

/// How to reach the blog API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// API root, e.g. `https://blog.example/api`.
    pub base_url: String,
    /// Page size requested for the full collection.
    pub page_limit: u32,
    /// Per-request timeout. `None` leaves timing out to the environment.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/api".into(),
            page_limit: DEFAULT_PAGE_LIMIT,
            request_timeout_secs: None,
            user_agent: format!("quill/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
