//! Progress events and the run summary.

use std::path::PathBuf;

use crate::error::ExtractError;
use crate::session::Session;

/// Something worth telling the user while a log is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractEvent {
    /// An eligible failed patch was found
    FailureFound {
        line: usize,
        index: usize,
        timestamp: Option<String>,
    },
    /// A session directory was created (or already existed)
    DirectoryCreated { path: PathBuf },
    /// The attempted diff was written
    DiffWritten { path: PathBuf },
    /// Original content of a targeted file was written
    OriginalWritten { relative: String, path: PathBuf },
    /// A line could not be decoded and was skipped
    MalformedLine { line: usize, reason: String },
    /// A logged path would escape the session directory and was skipped
    UnsafePath { relative: String },
    /// A failed patch was skipped because some original content is not text
    NonTextContent { line: usize, paths: Vec<String> },
}

impl ExtractEvent {
    /// User-facing line describing the event.
    pub fn message(&self) -> String {
        match self {
            Self::FailureFound {
                line, timestamp, ..
            } => match timestamp {
                Some(ts) => format!("Found a failed patch operation on line {line} (logged {ts})."),
                None => format!("Found a failed patch operation on line {line}."),
            },
            Self::DirectoryCreated { path } => {
                format!("  - Created directory: {}", path.display())
            }
            Self::DiffWritten { path } => {
                format!("  - Wrote attempted patch to: {}", path.display())
            }
            Self::OriginalWritten { relative, path } => format!(
                "  - Wrote original content for '{}' to: {}",
                relative,
                path.display()
            ),
            Self::MalformedLine { line, reason } => {
                let err = ExtractError::MalformedRecord {
                    line: *line,
                    reason: reason.clone(),
                };
                format!("Warning: {err}. Skipping.")
            }
            Self::UnsafePath { relative } => {
                let err = ExtractError::UnsafePath {
                    path: relative.clone(),
                };
                format!("  - Warning: {err}. Skipping.")
            }
            Self::NonTextContent { line, paths } => format!(
                "Warning: Failed patch on line {} has non-text original content for {}. Skipping.",
                line,
                paths
                    .iter()
                    .map(|p| format!("'{p}'"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Whether the event reports something that was skipped.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::MalformedLine { .. } | Self::UnsafePath { .. } | Self::NonTextContent { .. }
        )
    }
}

/// Outcome of a completed extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Sessions written, in index order
    pub sessions: Vec<Session>,
    pub lines_read: usize,
    pub malformed_lines: usize,
}

impl ExtractionSummary {
    /// Number of failed patches extracted.
    pub fn count(&self) -> usize {
        self.sessions.len()
    }

    /// Closing line for the run.
    pub fn message(&self) -> String {
        match self.count() {
            0 => "No failed patch operations with debug information were found in the file."
                .to_string(),
            n => format!("Successfully extracted debug files for {n} failed patch operation(s)."),
        }
    }
}
