//! Page loaders.
//!
//! Each loader waits for the context's store to be populated, then derives
//! the piece of shared state its page renders. Loaders never touch the
//! network themselves and never fail: a failed fetch surfaces through the
//! store's `error` field, and pages render whatever data was last loaded.

mod blog;
mod home;
mod layout;
mod post;
mod tags;

pub use blog::{load_blog_index, parse_page, BlogIndexPage};
pub use home::{load_home, HomePage, PageMeta};
pub use layout::{load_layout, RenderMode};
pub use post::{load_post, post_entries, PostEntry, PostPage};
pub use tags::{load_tag, load_tags, TagPage, TagSummary, TagsPage};
