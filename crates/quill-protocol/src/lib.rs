//! Wire contract for the Quill blog API.
//!
//! Defines the endpoint paths, request construction, and response envelopes
//! exchanged with the blog CRUD API. The API itself is an external
//! collaborator; this crate only describes what the client sends and accepts.

pub mod endpoint;
pub mod envelope;
pub mod error;

pub use endpoint::{endpoints, list_posts_url, post_url, DEFAULT_PAGE_LIMIT};
pub use envelope::{decode_post, decode_posts, status, ErrorEnvelope, PostEnvelope};
pub use error::{ProtocolError, ProtocolResult};
