use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("empty slug")]
    EmptySlug,

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
