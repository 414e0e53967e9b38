//! Error types for article extraction.

use thiserror::Error;

/// Errors that can occur while fetching or extracting an article.
///
/// Only input failures are errors. A failed text conversion or a
/// signature that matches nothing are ordinary outcomes, not faults.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    #[error("Invalid signature: {0:?}")]
    InvalidSignature(String),

    #[error("No URLs provided for calibration")]
    NoUrls,
}

pub type Result<T> = std::result::Result<T, Error>;
