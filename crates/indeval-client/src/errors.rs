use std::time::Duration;

use thiserror::Error;

/// Errors raised while talking to the extraction service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{endpoint}: http status code {status}")]
    UnexpectedStatus { endpoint: String, status: u16 },
    #[error("{endpoint}: unmarshal: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("server is not running: status {0}")]
    ServerNotReady(String),
    #[error("job ID is empty")]
    EmptyJobId,
    #[error("job failed with status: {0}")]
    JobFailed(String),
    #[error("job did not finish within {0:?}")]
    Timeout(Duration),
    #[error("cancelled")]
    Cancelled,
}

/// Result type for client operations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
