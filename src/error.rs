//! Error types shared across the application layers

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the form answer store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No question with this id exists in the active session.
    #[error("question '{id}' not found in form")]
    NotFound {
        /// The id that failed to resolve.
        id: String,
    },
}

/// Failures talking to the document database or blob store.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The request never produced a response (connection, timeout, TLS).
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A configured address or stored path does not form a valid URL.
    #[error("invalid url '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },

    /// The response body could not be decoded.
    #[error("invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    /// A blob exceeded the allowed download size.
    #[error("'{name}' is {size} bytes, limit is {limit}")]
    TooLarge {
        name: String,
        size: u64,
        limit: u64,
    },
}

impl BackendError {
    /// Whether repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            BackendError::Request { .. } => true,
            BackendError::Status { status, .. } => *status == 429 || *status >= 500,
            BackendError::InvalidUrl { .. }
            | BackendError::Decode { .. }
            | BackendError::TooLarge { .. } => false,
        }
    }
}

/// Failures reading or writing local files (icon cache, exports).
#[derive(Error, Debug)]
pub enum StorageError {
    /// A cache key or file name that would escape the target directory.
    #[error("invalid file name '{0}'")]
    InvalidName(String),

    /// Filesystem failure.
    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Download failure while filling the cache.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
