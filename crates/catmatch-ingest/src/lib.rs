//! Label list ingestion.
//!
//! Reads the two counted label blocks that feed the matcher from a
//! line-oriented text stream or file.

pub mod error;
pub mod reader;

pub use error::{IngestError, Result, Side};
pub use reader::{InputBlocks, read_blocks, read_file};
