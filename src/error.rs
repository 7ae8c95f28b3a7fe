//! Error types for soundtrack scraping.
//!
//! Extraction itself never fails; these errors come from the I/O
//! collaborators around it (page fetching, CLI output).

use thiserror::Error;

/// Main error type for all scraping operations.
#[derive(Debug, Error)]
pub enum SoundtrackError {
    /// HTTP request failed before a response was received.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The server answered with something other than 200 OK.
    #[error("status code error: {status}, url: {url}")]
    HttpStatus {
        /// Status code returned by the server.
        status: u16,
        /// URL that was requested.
        url: String,
    },

    /// Title identifier could not be used to build a URL.
    #[error("Invalid title id: {0}")]
    InvalidTitleId(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for scraping operations.
pub type Result<T> = std::result::Result<T, SoundtrackError>;
