use thiserror::Error;

/// Errors surfaced while presenting a run.
#[derive(Debug, Error)]
pub enum PresenterError {
    #[error("failed to write to terminal")]
    Terminal(#[from] std::io::Error),
}

/// A line of the event stream that isn't a valid event.
#[derive(Debug, Error)]
#[error("invalid event line `{line}`")]
pub struct ProtocolError {
    pub line: String,
    #[source]
    pub source: serde_json::Error,
}

pub type Result<T, E = PresenterError> = std::result::Result<T, E>;
