use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-2xx status.
    #[error("API error: {status}{}", detail(.message))]
    Status { status: u16, message: Option<String> },

    /// The body was not valid JSON or lacked the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("client setup failed: {0}")]
    ClientSetup(String),

    #[error("protocol error: {0}")]
    Protocol(#[from] quill_protocol::ProtocolError),
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" ({m})"))
        .unwrap_or_default()
}

pub type SyncResult<T> = Result<T, SyncError>;
