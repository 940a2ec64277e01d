use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid tags encoding: {0}")]
    InvalidTags(String),

    #[error("invalid integer: {0}")]
    InvalidInteger(String),
}
