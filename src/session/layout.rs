//! Naming of debug session directories and files.

use std::path::{Path, PathBuf};

use crate::config::Config;

/// Default prefix for session directories.
pub const DEFAULT_SESSION_PREFIX: &str = "debug_session_";

/// Default name of the diff file inside a session.
pub const DEFAULT_DIFF_FILE_NAME: &str = "failed_patch.diff";

/// Where session `N` and its files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLayout {
    root: PathBuf,
    session_prefix: String,
    diff_file_name: String,
}

impl Default for SessionLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            session_prefix: DEFAULT_SESSION_PREFIX.to_string(),
            diff_file_name: DEFAULT_DIFF_FILE_NAME.to_string(),
        }
    }
}

impl SessionLayout {
    /// Default naming rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Layout described by a (validated) config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.output.dir.clone(),
            session_prefix: config.output.session_prefix.clone(),
            diff_file_name: config.output.diff_file_name.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory name of session `index`, e.g. `debug_session_0`.
    pub fn session_name(&self, index: usize) -> String {
        format!("{}{}", self.session_prefix, index)
    }

    pub fn session_dir(&self, index: usize) -> PathBuf {
        self.root.join(self.session_name(index))
    }

    pub fn diff_path(&self, index: usize) -> PathBuf {
        self.session_dir(index).join(&self.diff_file_name)
    }
}
