//! Filesystem seam used by the materializer.

use std::fs;
use std::io;
use std::path::Path;

/// The filesystem operations a debug session needs.
///
/// Sessions only ever create directories and write whole files, so that is
/// all an implementation has to provide.
pub trait FileSystem {
    /// Create `path` and any missing parents. Succeeds if it already exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write `contents` to `path`, replacing any existing file.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Writes straight to the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        tracing::trace!(path = %path.display(), "create_dir_all");
        fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        tracing::trace!(path = %path.display(), bytes = contents.len(), "write");
        fs::write(path, contents)
    }
}
