// Error types shared by the store and the publisher operations.
// The binary converts these into `anyhow::Error` for display.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PublisherError>;

#[derive(Error, Debug)]
pub enum PublisherError {
    /// No local record exists for the publisher.
    #[error("Unknown publisher '{name}'")]
    NotFound { name: String },

    /// The store file exists but does not hold valid JSON.
    #[error("Error parsing store file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the store file failed.
    #[error("Error accessing store file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The gallery rejected the request (bad token, unknown publisher,
    /// network failure). The message is passed through untouched.
    #[error(transparent)]
    Remote(anyhow::Error),

    /// The user declined a confirmation prompt.
    #[error("Aborted")]
    Aborted,

    #[error("{0}")]
    Validation(String),

    /// Reading from the terminal failed.
    #[error("Prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}

impl PublisherError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PublisherError::Io {
            path: path.into(),
            source,
        }
    }
}
