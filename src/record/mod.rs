//! Tool-invocation records read from a metrics log.
//!
//! Each line of a `metrics.jsonl` file is one JSON object describing a single
//! tool invocation. Only a handful of fields matter here; everything else is
//! ignored. Every accessor returns `None` for a missing, `null` or wrongly
//! typed field, so classification never fails on a decoded record.

mod patch;

pub use patch::{FailedPatch, OriginalFile};

use serde_json::{Map, Value};

/// Tool name of patch invocations.
pub const PATCH_TOOL: &str = "patch";

/// Status recorded for invocations that did not apply.
pub const FAILED_STATUS: &str = "Failed";

/// Why a line could not be decoded into a [`Record`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("line is not valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// One decoded tool-invocation record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    tool: Option<Value>,
    status: Option<Value>,
    timestamp: Option<Value>,
    arguments: Option<Value>,
    failed_files_original_content: Option<Value>,
}

impl Record {
    /// Decode a record from one raw log line.
    pub fn from_bytes(line: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(line)?;
        Self::from_json(text)
    }

    /// Decode a record from a JSON string.
    pub fn from_json(line: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(line)?;
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(DecodeError::NotAnObject(json_kind(&other))),
        }
    }

    fn from_map(mut map: Map<String, Value>) -> Self {
        let mut take = |key: &str| map.remove(key).filter(|v| !v.is_null());
        Self {
            tool: take("tool"),
            status: take("status"),
            timestamp: take("timestamp"),
            arguments: take("arguments"),
            failed_files_original_content: take("failed_files_original_content"),
        }
    }

    pub fn tool(&self) -> Option<&str> {
        self.tool.as_ref().and_then(Value::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().and_then(Value::as_str)
    }

    /// When the metrics logger recorded the invocation, if it did.
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_ref().and_then(Value::as_str)
    }

    /// The `arguments.unified_diff` text.
    pub fn unified_diff(&self) -> Option<&str> {
        self.arguments.as_ref()?.get("unified_diff")?.as_str()
    }

    /// The path to original-content mapping, in logged order.
    pub fn original_files(&self) -> Option<&Map<String, Value>> {
        self.failed_files_original_content.as_ref()?.as_object()
    }

    /// Borrow this record as a failed patch if it is eligible for extraction.
    ///
    /// A record qualifies when it is a `patch` invocation with status
    /// `Failed`, carries a string `unified_diff`, and maps every original
    /// file path to string content.
    pub fn failed_patch(&self) -> Option<FailedPatch<'_>> {
        if self.tool()? != PATCH_TOOL || self.status()? != FAILED_STATUS {
            return None;
        }
        let diff = self.unified_diff()?;
        let files = self
            .original_files()?
            .iter()
            .map(|(path, content)| {
                content.as_str().map(|content| OriginalFile {
                    path: path.as_str(),
                    content,
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(FailedPatch {
            diff,
            files,
            timestamp: self.timestamp(),
        })
    }

    pub fn is_eligible(&self) -> bool {
        self.failed_patch().is_some()
    }

    /// Paths whose logged content is not text, for a failed patch that would
    /// otherwise qualify.
    ///
    /// Such a record cannot be rebuilt, but it is still a failed patch the
    /// user should hear about. Empty for every other record.
    pub fn non_text_files(&self) -> Vec<&str> {
        if self.tool() != Some(PATCH_TOOL)
            || self.status() != Some(FAILED_STATUS)
            || self.unified_diff().is_none()
        {
            return Vec::new();
        }
        self.original_files()
            .map(|files| {
                files
                    .iter()
                    .filter(|(_, content)| !content.is_string())
                    .map(|(path, _)| path.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
