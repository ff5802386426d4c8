//! Line reader for metrics logs.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::ExtractError;

/// One raw line from the log, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based line number
    pub number: usize,
    pub bytes: Vec<u8>,
}

/// Lazily yields the lines of a metrics log in file order.
///
/// Lines are read as bytes so that a line with invalid UTF-8 can be reported
/// on its own instead of failing the whole read. The iterator stops after the
/// first I/O error.
pub struct RecordReader<R> {
    inner: R,
    path: PathBuf,
    line: usize,
    done: bool,
}

impl RecordReader<BufReader<File>> {
    /// Open the log at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ExtractError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> RecordReader<R> {
    /// Read lines from any buffered source. `path` is only used in errors.
    pub fn new(inner: R, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
            line: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<RawLine, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut bytes = Vec::new();
        match self.inner.read_until(b'\n', &mut bytes) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                strip_line_ending(&mut bytes);
                self.line += 1;
                Some(Ok(RawLine {
                    number: self.line,
                    bytes,
                }))
            }
            Err(e) => {
                self.done = true;
                Some(Err(ExtractError::io(&self.path, e)))
            }
        }
    }
}

fn strip_line_ending(bytes: &mut Vec<u8>) {
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
}
