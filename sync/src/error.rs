//! Persistence bridge error type.
//!
//! Remote failures never reach the editor as errors: the bridge turns them
//! into a local write or read and reports it through `SaveOutcome` and
//! `LoadSource`. What surfaces here is what the bridge cannot recover from.

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("http transport failed: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("payload decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("local store failed: {0}")]
    Store(#[from] std::io::Error),
    #[error("drawing parse failed: {0}")]
    Parse(#[from] plan_drawing::ParseError),
    #[error("no API base address is configured")]
    NoBaseAvailable,
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
