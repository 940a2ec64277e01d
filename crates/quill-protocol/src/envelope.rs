use serde::{Deserialize, Serialize};

use quill_types::{Post, PostsData};

use crate::error::{ProtocolError, ProtocolResult};

/// Values of the `status` field carried by every response body.
pub mod status {
    pub const SUCCESS: &str = "success";
    pub const ERROR: &str = "error";
}

/// Response of `GET /posts/{slug}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEnvelope {
    pub post: Option<Post>,
    pub status: String,
}

impl PostEnvelope {
    /// Envelope for a lookup result: `success` when a post is present,
    /// `error` otherwise.
    pub fn from_lookup(post: Option<Post>) -> Self {
        let status = if post.is_some() { status::SUCCESS } else { status::ERROR };
        Self { post, status: status.into() }
    }

    pub fn is_success(&self) -> bool {
        self.status == status::SUCCESS
    }
}

/// Body of a failed request: `{status: "error", message}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub status: String,
    pub message: String,
}

impl ErrorEnvelope {
    /// Parse an error body, if the bytes are one.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice::<Self>(body)
            .ok()
            .filter(|e| e.status == status::ERROR)
    }
}

/// Decode the body of `GET /posts`.
pub fn decode_posts(body: &[u8]) -> ProtocolResult<PostsData> {
    serde_json::from_slice(body).map_err(|e| ProtocolError::Deserialization(e.to_string()))
}

/// Decode the body of `GET /posts/{slug}`.
pub fn decode_post(body: &[u8]) -> ProtocolResult<PostEnvelope> {
    serde_json::from_slice(body).map_err(|e| ProtocolError::Deserialization(e.to_string()))
}
