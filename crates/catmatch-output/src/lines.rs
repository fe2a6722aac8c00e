//! `key:value` line output.
//!
//! One line per distinct key, in matching order, terminated by `\n`. Labels
//! are written verbatim; a label that itself contains `:` makes the line
//! ambiguous to split, which the format does not guard against.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use catmatch_map::Matching;
use tracing::debug;

use crate::error::{OutputError, Result};

/// Separator between key and value.
pub const SEPARATOR: char = ':';

/// Writes the collapsed map view of `matching` to `writer`.
pub fn write_lines<W: Write>(writer: &mut W, matching: &Matching) -> std::io::Result<()> {
    for (key, value) in matching {
        writeln!(writer, "{key}{SEPARATOR}{value}")?;
    }
    Ok(())
}

/// Renders the output lines into a string.
pub fn render_lines(matching: &Matching) -> String {
    let mut out = String::new();
    for (key, value) in matching {
        out.push_str(key);
        out.push(SEPARATOR);
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// Writes the output lines to `path`, creating parent directories.
pub fn write_file(path: &Path, matching: &Matching) -> Result<()> {
    ensure_parent(path)?;
    let write_err = |source: std::io::Error| OutputError::WriteFile {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, matching).map_err(write_err)?;
    writer.flush().map_err(write_err)?;
    debug!(path = %path.display(), lines = matching.len(), "wrote matching");
    Ok(())
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
