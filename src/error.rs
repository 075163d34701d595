//! Error types for the unscrap library.

use std::io;
use thiserror::Error;

/// Result type alias for unscrap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a captured page.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the snapshot or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An element required by the page structure is missing.
    #[error("Missing expected element: {0}")]
    MissingElement(&'static str),

    /// A heading span carries a malformed level class (strict mode only).
    #[error("Invalid heading level: {0:?}")]
    InvalidHeadingLevel(String),

    /// An indentation marker carries a width that cannot be read.
    #[error("Invalid indent width: {0:?}")]
    InvalidIndent(String),

    /// A base URL or href could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The page title is empty after sanitization.
    #[error("Page title is empty; cannot derive an output filename")]
    EmptyTitle,

    /// The assembled document has no title line to derive a filename from.
    #[error("Document has no title line")]
    MissingTitle,

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}
