//! Filesystem query abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that probes (dock app paths,
//! cloned repositories, installed frameworks, dotfile contents) can be
//! unit-tested without touching the real filesystem. Production code uses
//! [`SystemFileSystemOps`]; tests use `MockFileSystemOps`.

use std::path::Path;

/// Abstraction over the filesystem queries used by probes.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `true` if `path` exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable.
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Mock [`FileSystemOps`] for unit tests.
///
/// # Example
///
/// ```ignore
/// let fs = MockFileSystemOps::new()
///     .with_existing("/Applications/Firefox.app")
///     .with_file("/repo/dotfiles/.zshrc", "export A=1");
/// ```
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    existing: std::collections::HashSet<std::path::PathBuf>,
    dirs: std::collections::HashSet<std::path::PathBuf>,
    files: std::collections::HashMap<std::path::PathBuf, Vec<u8>>,
}

#[cfg(test)]
impl MockFileSystemOps {
    /// Create an empty mock where nothing exists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as existing, with no readable content.
    #[must_use]
    pub fn with_existing(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.existing.insert(path.into());
        self
    }

    /// Mark `path` as a directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }

    /// Add a regular file holding `content`.
    #[must_use]
    pub fn with_file(
        mut self,
        path: impl Into<std::path::PathBuf>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

#[cfg(test)]
impl FileSystemOps for MockFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        self.existing.contains(path) || self.is_dir(path) || self.is_file(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("mock: cannot read {}", path.display()),
            )
        })
    }
}
