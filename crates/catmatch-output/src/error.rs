//! Error types for result writing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing matching results.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be created or written.
    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to a caller-supplied stream failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
