//! Foundation types for Quill.
//!
//! This crate provides the data model shared by every other Quill crate: the
//! records exposed by the blog API and the helpers used to decode them.
//!
//! # Key Types
//!
//! - [`Post`]: A single blog entry record
//! - [`Pagination`]: The page window described by a list response
//! - [`PostsData`]: Decoded payload of the post collection endpoint
//!
//! The blog API emits database columns verbatim, so integers may arrive as
//! strings and tags may arrive as a JSON-encoded string. Decoding normalizes
//! both before a value ever reaches the store.

pub mod date;
pub mod de;
pub mod error;
pub mod post;
pub mod tags;

pub use date::{extract_date, format_date, INVALID_DATE};
pub use error::TypeError;
pub use post::{Pagination, Post, PostsData};
pub use tags::normalize_tags;
