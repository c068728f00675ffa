//! Error types for dotview

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dotview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Can't open data file '{}': {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias for dotview operations
pub type Result<T> = std::result::Result<T, Error>;
