//! Counted label block reader.
//!
//! The input stream holds two blocks back to back, source first:
//!
//! ```text
//! 3
//! гвоздь
//! шуруп
//! краска синяя
//! 2
//! краска
//! шуруп 3х1.5
//! ```
//!
//! Each block starts with a count line followed by exactly that many label
//! lines. Labels are kept verbatim apart from the line terminator, so blank
//! labels and surrounding whitespace survive.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::error::{IngestError, Result, Side};

/// The two label lists read from one input stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBlocks {
    pub source: Vec<String>,
    pub target: Vec<String>,
}

/// Reads the source and target blocks from `reader`.
///
/// Anything after the target block is ignored.
pub fn read_blocks<R: BufRead>(reader: R) -> Result<InputBlocks> {
    let mut lines = LineReader::new(reader);
    let source = lines.read_block(Side::Source)?;
    let target = lines.read_block(Side::Target)?;
    if lines.has_trailing_content() {
        debug!(line = lines.line + 1, "ignoring content after target block");
    }
    debug!(
        source = source.len(),
        target = target.len(),
        "read label blocks"
    );
    Ok(InputBlocks { source, target })
}

/// Opens `path` and reads both label blocks from it.
pub fn read_file(path: &Path) -> Result<InputBlocks> {
    let span = info_span!("read_input", path = %path.display());
    let _guard = span.enter();
    let file = File::open(path).map_err(|source| IngestError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    read_blocks(BufReader::new(file))
}

struct LineReader<R> {
    reader: R,
    /// Number of lines consumed so far.
    line: usize,
    buffer: String,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buffer: String::new(),
        }
    }

    /// Returns the next line without its terminator, or `None` at end of input.
    fn next_line(&mut self, side: Side) -> Result<Option<&str>> {
        self.buffer.clear();
        let read = self
            .reader
            .read_line(&mut self.buffer)
            .map_err(|source| IngestError::Read {
                side,
                line: self.line + 1,
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        self.line += 1;
        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            if self.buffer.ends_with('\r') {
                self.buffer.pop();
            }
        }
        let text = if self.line == 1 {
            self.buffer.strip_prefix('\u{feff}').unwrap_or(&self.buffer)
        } else {
            self.buffer.as_str()
        };
        Ok(Some(text))
    }

    fn read_count(&mut self, side: Side) -> Result<usize> {
        let expected_line = self.line + 1;
        let Some(raw) = self.next_line(side)? else {
            return Err(IngestError::MissingCount {
                side,
                line: expected_line,
            });
        };
        let value = raw.trim();
        value
            .parse::<usize>()
            .map_err(|source| IngestError::InvalidCount {
                side,
                line: expected_line,
                value: value.to_string(),
                source,
            })
    }

    fn read_block(&mut self, side: Side) -> Result<Vec<String>> {
        let expected = self.read_count(side)?;
        let mut labels = Vec::with_capacity(expected.min(4096));
        while labels.len() < expected {
            let missing_line = self.line + 1;
            match self.next_line(side)? {
                Some(label) => labels.push(label.to_string()),
                None => {
                    return Err(IngestError::Truncated {
                        side,
                        line: missing_line,
                        expected,
                        found: labels.len(),
                    });
                }
            }
        }
        Ok(labels)
    }

    fn has_trailing_content(&mut self) -> bool {
        self.reader
            .fill_buf()
            .map(|buf| !buf.is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> Result<InputBlocks> {
        read_blocks(input.as_bytes())
    }

    #[test]
    fn test_reads_both_blocks() {
        let blocks = read("3\napple\nbanana\ncherry\n2\napple\ncherry\n").unwrap();
        assert_eq!(blocks.source, vec!["apple", "banana", "cherry"]);
        assert_eq!(blocks.target, vec!["apple", "cherry"]);
    }

    #[test]
    fn test_zero_counts() {
        let blocks = read("0\n0\n").unwrap();
        assert!(blocks.source.is_empty());
        assert!(blocks.target.is_empty());
    }

    #[test]
    fn test_missing_final_newline() {
        let blocks = read("1\na\n1\nb").unwrap();
        assert_eq!(blocks.target, vec!["b"]);
    }

    #[test]
    fn test_crlf_and_bom() {
        let blocks = read("\u{feff}1\r\nкраска синяя\r\n1\r\nкраска\r\n").unwrap();
        assert_eq!(blocks.source, vec!["краска синяя"]);
        assert_eq!(blocks.target, vec!["краска"]);
    }

    #[test]
    fn test_labels_kept_verbatim() {
        let blocks = read(" 2 \n  padded  \n\n0\n").unwrap();
        assert_eq!(blocks.source, vec!["  padded  ", ""]);
    }

    #[test]
    fn test_trailing_content_ignored() {
        let blocks = read("1\na\n1\nb\nextra\n").unwrap();
        assert_eq!(blocks.source, vec!["a"]);
        assert_eq!(blocks.target, vec!["b"]);
    }

    #[test]
    fn test_empty_input() {
        let err = read("").unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingCount {
                side: Side::Source,
                line: 1
            }
        ));
    }

    #[test]
    fn test_missing_target_block() {
        let err = read("1\na\n").unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingCount {
                side: Side::Target,
                line: 3
            }
        ));
    }

    #[test]
    fn test_invalid_count() {
        let err = read("two\na\nb\n").unwrap_err();
        match err {
            IngestError::InvalidCount {
                side, line, value, ..
            } => {
                assert_eq!(side, Side::Source);
                assert_eq!(line, 1);
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_count() {
        let err = read("1\na\n-1\n").unwrap_err();
        assert_eq!(err.side(), Some(Side::Target));
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_truncated_target() {
        let err = read("1\na\n3\nx\ny\n").unwrap_err();
        match err {
            IngestError::Truncated {
                side,
                line,
                expected,
                found,
            } => {
                assert_eq!(side, Side::Target);
                assert_eq!(line, 6);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes: &[u8] = b"1\n\xff\xfe\n0\n";
        let err = read_blocks(bytes).unwrap_err();
        assert!(matches!(
            err,
            IngestError::Read {
                side: Side::Source,
                line: 2,
                ..
            }
        ));
    }
}
