//! Error types for plot2csv library.
//!
//! The text-to-CSV parser never fails; these errors come from the code
//! around it (reading input, sniffing images, talking to the OCR service).

use std::io;
use thiserror::Error;

/// Result type alias for plot2csv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur outside the parser core.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The bytes are not a recognised image format.
    #[error("Unknown file format: not a supported image")]
    UnknownFormat,

    /// A configured pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The OCR service answered but reported a failure.
    #[error("{0}")]
    Service(String),

    /// The OCR service answered with a non-success HTTP status.
    #[error("Failed to extract data: API request failed (HTTP {0})")]
    Http(u16),

    /// The request to the OCR service could not be completed.
    #[error("Transport error: {0}")]
    Transport(String),
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Error::Http(status.as_u16())
        } else {
            Error::Transport(err.to_string())
        }
    }
}
