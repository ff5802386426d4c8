//! Debug session materialization.
//!
//! A debug session is one numbered directory holding the diff of a failed
//! patch next to the pre-patch content of every file it targeted, laid out
//! with the same relative paths the agent saw:
//!
//! ```text
//! debug_session_0/
//!   failed_patch.diff
//!   src/lib.rs
//! ```
//!
//! Sessions are written once and never read back. Existing files are
//! overwritten, nothing is deleted, and a failed write leaves whatever was
//! already written in place.

mod fs;
mod layout;

pub use fs::{FileSystem, LocalFileSystem};
pub use layout::{SessionLayout, DEFAULT_DIFF_FILE_NAME, DEFAULT_SESSION_PREFIX};

use std::path::{Component, Path, PathBuf};

use crate::error::ExtractError;
use crate::event::ExtractEvent;
use crate::record::FailedPatch;

/// A session that has been fully written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub index: usize,
    pub dir: PathBuf,
    pub diff_path: PathBuf,
    /// Original-content files written, in logged order
    pub files: Vec<PathBuf>,
    /// Logged paths that were not written because they escape `dir`
    pub skipped: Vec<String>,
}

/// Writes failed patches out as debug sessions.
pub struct Materializer {
    layout: SessionLayout,
    fs: Box<dyn FileSystem>,
}

impl Materializer {
    /// Write to the local disk using `layout`.
    pub fn new(layout: SessionLayout) -> Self {
        Self::with_fs(layout, Box::new(LocalFileSystem))
    }

    /// Write through a specific filesystem (for testing).
    pub fn with_fs(layout: SessionLayout, fs: Box<dyn FileSystem>) -> Self {
        Self { layout, fs }
    }

    /// Write session `index` for `patch`, reporting progress to `on_event`.
    ///
    /// The first filesystem error aborts the session and is returned as
    /// [`ExtractError::Io`].
    pub fn materialize(
        &self,
        index: usize,
        patch: &FailedPatch<'_>,
        on_event: &mut dyn FnMut(ExtractEvent),
    ) -> Result<Session, ExtractError> {
        let dir = self.layout.session_dir(index);
        self.fs
            .create_dir_all(&dir)
            .map_err(|e| ExtractError::io(&dir, e))?;
        on_event(ExtractEvent::DirectoryCreated { path: dir.clone() });

        let diff_path = self.layout.diff_path(index);
        self.fs
            .write(&diff_path, patch.diff.as_bytes())
            .map_err(|e| ExtractError::io(&diff_path, e))?;
        on_event(ExtractEvent::DiffWritten {
            path: diff_path.clone(),
        });

        let mut files = Vec::with_capacity(patch.files.len());
        let mut skipped = Vec::new();
        for file in &patch.files {
            let Some(relative) = confined_path(file.path) else {
                tracing::debug!(session = index, path = file.path, "skipping unsafe path");
                on_event(ExtractEvent::UnsafePath {
                    relative: file.path.to_string(),
                });
                skipped.push(file.path.to_string());
                continue;
            };

            let target = dir.join(relative);
            if let Some(parent) = target.parent() {
                self.fs
                    .create_dir_all(parent)
                    .map_err(|e| ExtractError::io(parent, e))?;
            }
            self.fs
                .write(&target, file.content.as_bytes())
                .map_err(|e| ExtractError::io(&target, e))?;
            on_event(ExtractEvent::OriginalWritten {
                relative: file.path.to_string(),
                path: target.clone(),
            });
            files.push(target);
        }

        Ok(Session {
            index,
            dir,
            diff_path,
            files,
            skipped,
        })
    }
}

/// Normalize a logged path so it stays inside the session directory.
///
/// Returns `None` for absolute paths, paths with `..`, and paths that name
/// no file at all.
fn confined_path(relative: &str) -> Option<PathBuf> {
    let mut confined = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => confined.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if confined.as_os_str().is_empty() {
        None
    } else {
        Some(confined)
    }
}
