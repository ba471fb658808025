//! Error types for the portmap-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for portmap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while discovering compose port bindings.
#[derive(Error, Debug)]
pub enum Error {
    /// The apps root directory could not be listed.
    #[error("Failed to read apps directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
