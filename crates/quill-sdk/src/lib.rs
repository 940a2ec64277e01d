//! High-level SDK for Quill.
//!
//! Provides the [`BlogContext`] that owns one post store and its fetch
//! coordinator, plus the page loaders that wait for the store to be populated
//! before deriving what a page needs. This is the main entry point for
//! applications embedding Quill.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod loaders;

#[cfg(test)]
mod fixtures;

pub use config::{ClientConfig, SiteConfig};
pub use context::BlogContext;
pub use error::{SdkError, SdkResult};
pub use loaders::{
    BlogIndexPage, HomePage, PageMeta, PostEntry, PostPage, RenderMode, TagPage, TagSummary,
    TagsPage,
};

// Re-export key types
pub use quill_protocol::PostEnvelope;
pub use quill_store::{extract_date, format_date, PostStore, StoreState, Subscription};
pub use quill_sync::{FetchOutcome, FetchPhase, HttpPostsSource, PostsSource, TransportConfig};
pub use quill_types::{Pagination, Post, PostsData};
