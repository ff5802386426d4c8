//! Extraction driver: reads a metrics log and materializes every failed patch.
//!
//! Each line goes through three steps:
//! 1. decode the line as a [`Record`], warning and moving on if it is malformed
//! 2. keep only records describing a failed patch with debug information
//! 3. write a debug session for it, numbered in encounter order
//!
//! The session counter is carried in the [`ExtractionSummary`] that is folded
//! over the lines, so the next index is always the number of sessions written.

use std::io::BufRead;
use std::path::Path;

use crate::config::Config;
use crate::error::ExtractError;
use crate::event::{ExtractEvent, ExtractionSummary};
use crate::reader::{RawLine, RecordReader};
use crate::record::Record;
use crate::session::{Materializer, SessionLayout};

/// Turns a metrics log into debug sessions.
pub struct Extractor {
    materializer: Materializer,
}

impl Extractor {
    pub fn new(materializer: Materializer) -> Self {
        Self { materializer }
    }

    /// Extractor writing to the local disk with the configured layout.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Materializer::new(SessionLayout::from_config(config)))
    }

    /// Process the log at `path`.
    ///
    /// Fails with [`ExtractError::SourceNotFound`] if `path` does not exist and
    /// with [`ExtractError::Io`] on the first read or write error. Malformed
    /// lines never fail the run.
    pub fn run(
        &self,
        path: &Path,
        on_event: &mut dyn FnMut(ExtractEvent),
    ) -> Result<ExtractionSummary, ExtractError> {
        let reader = RecordReader::open(path)?;
        self.run_reader(reader, on_event)
    }

    /// Process lines from an already opened reader.
    pub fn run_reader<R: BufRead>(
        &self,
        reader: RecordReader<R>,
        on_event: &mut dyn FnMut(ExtractEvent),
    ) -> Result<ExtractionSummary, ExtractError> {
        reader
            .into_iter()
            .try_fold(
                ExtractionSummary::default(),
                |summary, line| -> Result<ExtractionSummary, ExtractError> {
                    let line = line?;
                    self.step(summary, line, &mut *on_event)
                },
            )
    }

    fn step(
        &self,
        mut summary: ExtractionSummary,
        line: RawLine,
        on_event: &mut dyn FnMut(ExtractEvent),
    ) -> Result<ExtractionSummary, ExtractError> {
        summary.lines_read += 1;

        let record = match Record::from_bytes(&line.bytes) {
            Ok(record) => record,
            Err(e) => {
                summary.malformed_lines += 1;
                on_event(ExtractEvent::MalformedLine {
                    line: line.number,
                    reason: e.to_string(),
                });
                return Ok(summary);
            }
        };

        let Some(patch) = record.failed_patch() else {
            let non_text = record.non_text_files();
            if !non_text.is_empty() {
                on_event(ExtractEvent::NonTextContent {
                    line: line.number,
                    paths: non_text.into_iter().map(str::to_string).collect(),
                });
                return Ok(summary);
            }
            tracing::debug!(
                line = line.number,
                tool = ?record.tool(),
                status = ?record.status(),
                "skipping record"
            );
            return Ok(summary);
        };

        let index = summary.count();
        on_event(ExtractEvent::FailureFound {
            line: line.number,
            index,
            timestamp: patch.timestamp.map(str::to_string),
        });
        let session = self.materializer.materialize(index, &patch, on_event)?;
        summary.sessions.push(session);
        Ok(summary)
    }
}
