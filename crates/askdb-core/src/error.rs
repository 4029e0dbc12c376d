//! Error types for askdb.

use thiserror::Error;

/// askdb error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request never completed, or its body was not a query response.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

/// Result type alias for askdb operations.
pub type Result<T> = std::result::Result<T, Error>;
