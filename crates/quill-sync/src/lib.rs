//! Fetch coordination for Quill.
//!
//! Guarantees at most one outstanding retrieval of the full post collection.
//! Every caller, whether it arrives before, during, or after the in-flight
//! fetch, observes one consistent terminal state in the shared store.
//!
//! The network is reached through the [`PostsSource`] trait;
//! [`HttpPostsSource`] implements it against the blog API.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod http;
pub mod transport;

pub use config::TransportConfig;
pub use coordinator::{FetchCoordinator, FetchOutcome, FetchPhase};
pub use error::{SyncError, SyncResult};
pub use http::HttpPostsSource;
pub use transport::PostsSource;
