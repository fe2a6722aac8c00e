//! JSON matching report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use catmatch_map::{MatchStats, MatchedPair, Matching};
use serde::Serialize;
use tracing::debug;

use crate::error::{OutputError, Result};
use crate::lines::ensure_parent;

/// Serializable view of a matching, including pairs hidden by key collapse.
#[derive(Debug, Serialize)]
pub struct MatchReport<'a> {
    pub placeholder: &'a str,
    pub stats: MatchStats,
    pub pairs: &'a [MatchedPair],
}

impl<'a> MatchReport<'a> {
    pub fn new(matching: &'a Matching) -> Self {
        Self {
            placeholder: matching.placeholder(),
            stats: matching.stats(),
            pairs: matching.pairs(),
        }
    }
}

/// Writes a pretty-printed JSON report to `writer`.
pub fn write_json<W: Write>(writer: &mut W, matching: &Matching) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &MatchReport::new(matching))?;
    writeln!(writer)?;
    Ok(())
}

/// Writes a JSON report to `path`, creating parent directories.
pub fn write_json_file(path: &Path, matching: &Matching) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|source| OutputError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_json(&mut writer, matching)?;
    writer.flush().map_err(|source| OutputError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "wrote JSON report");
    Ok(())
}
