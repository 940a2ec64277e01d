//! Shared post store for Quill.
//!
//! Holds the client-side cached representation of the post collection and its
//! load status. One [`PostStore`] exists per context; loaders read it, and only
//! the fetch coordinator writes it, through [`PostStore::update`].
//!
//! # Design Rules
//!
//! 1. `is_loading` and `is_loaded` are never both true.
//! 2. `error` is cleared on every successful load.
//! 3. `data` is replaced wholesale, never merged.
//! 4. Updates are serialized: observers see transitions in call order.
//! 5. A new subscriber is handed the current state before any later transition.
//! 6. Observers run synchronously and must not call back into the same store.

pub mod state;
pub mod store;

pub use quill_types::{extract_date, format_date};
pub use state::StoreState;
pub use store::{PostStore, Subscription};
