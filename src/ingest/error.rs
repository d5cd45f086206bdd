//! Failure kinds for a single delivery attempt.

use thiserror::Error;

/// Reasons an entry was not accepted by the ingestion service.
#[derive(Debug, Error)]
pub enum SendError {
    /// The entry could not be encoded as JSON.
    #[error("failed to serialise log entry: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The request could not be built, typically because the host is not a
    /// valid URL.
    #[error("invalid ingestion URL {url}: {message}")]
    RequestConstruction { url: String, message: String },
    /// The service could not be reached.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },
    /// The service answered with a status other than 200.
    #[error("{status} {body}")]
    ServerRejected { status: u16, body: String },
}

impl SendError {
    /// Status code of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
