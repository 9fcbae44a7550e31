//! In-memory file system for testing.
//!
//! Provides [`MockFileSystem`] for exercising the converter without disk access.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::fs::FileSystem;

/// A recorded mutating operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FsOp {
    Rename { from: PathBuf, to: PathBuf },
    Write { path: PathBuf },
}

/// Mock file system for testing.
///
/// Stores files in memory and records every rename and write in order.
///
/// # Example
///
/// ```ignore
/// use docmap_core::{FileSystem, MockFileSystem};
///
/// let fs = MockFileSystem::new().with_file("/docs/mkdocs.yml", "site_name: Demo");
/// let content = fs.read_to_string(Path::new("/docs/mkdocs.yml")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, String>>,
    ops: RwLock<Vec<FsOp>>,
    read_only: RwLock<Vec<PathBuf>>,
}

impl MockFileSystem {
    /// Create a new empty mock file system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Make writes to `path` fail with `PermissionDenied`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_read_only(self, path: impl Into<PathBuf>) -> Self {
        self.read_only.write().unwrap().push(path.into());
        self
    }

    /// Get the content of a file, if present.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.read().unwrap().get(path.as_ref()).cloned()
    }

    /// Check whether a file exists.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.files.read().unwrap().contains_key(path.as_ref())
    }

    /// Mutating operations performed so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn ops(&self) -> Vec<FsOp> {
        self.ops.read().unwrap().clone()
    }

    fn check_writable(&self, path: &Path) -> io::Result<()> {
        if self.read_only.read().unwrap().iter().any(|p| p == path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            ));
        }
        Ok(())
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.file(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.check_writable(to)?;
        let mut files = self.files.write().unwrap();
        let content = files.remove(from).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", from.display()),
            )
        })?;
        files.insert(to.to_path_buf(), content);
        self.ops.write().unwrap().push(FsOp::Rename {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        Ok(())
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.check_writable(path)?;
        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_owned());
        self.ops.write().unwrap().push(FsOp::Write {
            path: path.to_path_buf(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file() {
        let fs = MockFileSystem::new();

        let err = fs.read_to_string(Path::new("/missing")).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_rename_moves_content() {
        let fs = MockFileSystem::new().with_file("/docs/index.md", "# Home");

        fs.rename(Path::new("/docs/index.md"), Path::new("/docs/abstract.md"))
            .unwrap();

        assert!(!fs.exists("/docs/index.md"));
        assert_eq!(fs.file("/docs/abstract.md"), Some("# Home".to_owned()));
    }

    #[test]
    fn test_write_records_op() {
        let fs = MockFileSystem::new();

        fs.write(Path::new("/docs/out.xml"), "<x/>").unwrap();

        assert_eq!(
            fs.ops(),
            vec![FsOp::Write {
                path: PathBuf::from("/docs/out.xml")
            }]
        );
    }

    #[test]
    fn test_read_only_rejects_write() {
        let fs = MockFileSystem::new().with_read_only("/docs/out.xml");

        let err = fs.write(Path::new("/docs/out.xml"), "<x/>").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(fs.ops().is_empty());
    }

    #[test]
    fn test_mock_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockFileSystem>();
    }
}
