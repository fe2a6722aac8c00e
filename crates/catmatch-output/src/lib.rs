//! Output writers for matching results.
//!
//! - **Lines**: `key:value`, one per distinct key, the primary output format
//! - **JSON**: a report with every pair, its kind and similarity, and summary counts

pub mod error;
pub mod lines;
pub mod report;

pub use error::{OutputError, Result};
pub use lines::{SEPARATOR, render_lines, write_file, write_lines};
pub use report::{MatchReport, write_json, write_json_file};
