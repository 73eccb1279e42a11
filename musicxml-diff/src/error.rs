//! Error types for the diff engine.

use thiserror::Error;

/// Result type alias for diff operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while diffing or projecting overlays.
#[derive(Error, Debug)]
pub enum Error {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML error from quick-xml.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}
