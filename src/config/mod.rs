//! Configuration for where and how debug sessions are written.
//!
//! Settings come from three places, later ones winning:
//! built-in defaults, an optional TOML file, then command-line flags.
//!
//! ```toml
//! [output]
//! dir = "debug"
//! session_prefix = "debug_session_"
//! diff_file_name = "failed_patch.diff"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::session::{DEFAULT_DIFF_FILE_NAME, DEFAULT_SESSION_PREFIX};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory session directories are created in
    pub dir: PathBuf,
    /// Session directory name prefix, followed by the failure index
    pub session_prefix: String,
    /// File name of the attempted diff inside each session
    pub diff_file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            session_prefix: DEFAULT_SESSION_PREFIX.to_string(),
            diff_file_name: DEFAULT_DIFF_FILE_NAME.to_string(),
        }
    }
}

impl Config {
    /// Load and validate a config file. Missing fields take their defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the session and diff names are single path components.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_name("output.session_prefix", &self.output.session_prefix)?;
        validate_name("output.diff_file_name", &self.output.diff_file_name)
    }
}

fn validate_name(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let invalid = |reason| ConfigError::InvalidName {
        field,
        value: value.to_string(),
        reason,
    };

    if value.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }
    if value.contains(['/', '\\']) {
        return Err(invalid("must not contain path separators"));
    }
    if value == "." || value == ".." {
        return Err(invalid("must name a file"));
    }
    Ok(())
}
