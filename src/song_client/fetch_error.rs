use reqwest::Error as ReqwestError;
use thiserror::Error;
use tokio::task::JoinError;

/// Reasons a song feed fetch can fail.
///
/// Nothing is retried; callers show a generic failure and keep whatever was on
/// screen before.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout, or a non-success HTTP status.
    #[error("Transport error: {0}")]
    Transport(#[from] ReqwestError),
    /// The body was not a JSON array of song objects.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Fetch worker failed: {0}")]
    Worker(#[from] JoinError),
}

impl FetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, FetchError::Parse(_))
    }
}
