//! Error types for label list ingestion.

use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which of the two label blocks an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Source,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Errors that can occur while reading label lists.
///
/// Line numbers are 1-based and count every line of the input stream.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file could not be opened.
    #[error("failed to open input file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from the stream failed (including invalid UTF-8).
    #[error("failed to read {side} block at line {line}: {source}")]
    Read {
        side: Side,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// The stream ended where a count line was expected.
    #[error("missing {side} count at line {line}")]
    MissingCount { side: Side, line: usize },

    /// The count line is not a non-negative integer.
    #[error("invalid {side} count '{value}' at line {line}: {source}")]
    InvalidCount {
        side: Side,
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The stream ended before the declared number of labels was read.
    /// `line` is the first line that was expected but missing.
    #[error("{side} block declares {expected} labels, found {found} (input ends before line {line})")]
    Truncated {
        side: Side,
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl IngestError {
    /// The block the error refers to, if any.
    pub fn side(&self) -> Option<Side> {
        match self {
            Self::FileOpen { .. } => None,
            Self::Read { side, .. }
            | Self::MissingCount { side, .. }
            | Self::InvalidCount { side, .. }
            | Self::Truncated { side, .. } => Some(*side),
        }
    }

    /// The 1-based line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::FileOpen { .. } => None,
            Self::Read { line, .. }
            | Self::MissingCount { line, .. }
            | Self::InvalidCount { line, .. }
            | Self::Truncated { line, .. } => Some(*line),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
