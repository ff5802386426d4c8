//! Extraction and configuration errors.

use std::path::PathBuf;

/// Errors that can occur while extracting debug sessions.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("File not found at '{}'", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Could not parse line {line} as JSON: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("I/O failure on '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to write '{path}' outside the session directory")]
    UnsafePath { path: String },
}

impl ExtractError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors from loading or validating the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidName {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}
