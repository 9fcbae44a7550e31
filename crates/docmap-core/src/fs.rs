//! File system capability used by the converter.
//!
//! The converter never touches `std::fs` directly; it goes through
//! [`FileSystem`] so the pipeline can run against [`MockFileSystem`] in tests.
//!
//! [`MockFileSystem`]: crate::MockFileSystem

use std::io;
use std::path::Path;

/// The three file operations a conversion performs.
pub trait FileSystem {
    /// Read a whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Move `from` to `to`, replacing `to` if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` does not exist or cannot be moved.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Create or truncate `path` and write `contents` to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}
