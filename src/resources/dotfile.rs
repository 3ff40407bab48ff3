//! Shell dotfiles copied into the home directory.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::operations::FileSystemOps;

/// Dotfiles shipped in `<root>/dotfiles/`.
pub const DOTFILES: &[&str] = &[".zshrc", ".zsh_aliases", ".zsh_functions"];

/// Timestamp suffix format for backups of replaced dotfiles.
pub const BACKUP_STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// A dotfile copied from the repository to the home directory.
///
/// A differing target is moved to `<target>.backup.<stamp>` before being
/// overwritten. Reads go through [`FileSystemOps`]; the rename and copy
/// touch the real filesystem.
#[derive(Debug, Clone)]
pub struct DotfileCopy<'a> {
    pub source: PathBuf,
    pub target: PathBuf,
    /// Backup suffix, formatted with [`BACKUP_STAMP_FORMAT`].
    pub stamp: String,
    fs_ops: &'a dyn FileSystemOps,
}

impl<'a> DotfileCopy<'a> {
    #[must_use]
    pub fn new(
        source: PathBuf,
        target: PathBuf,
        stamp: impl Into<String>,
        fs_ops: &'a dyn FileSystemOps,
    ) -> Self {
        Self {
            source,
            target,
            stamp: stamp.into(),
            fs_ops,
        }
    }

    /// Where an existing target is moved before it is replaced.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .target
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(format!(".backup.{}", self.stamp));
        self.target.with_file_name(name)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.fs_ops
            .read(path)
            .with_context(|| format!("read {}", path.display()))
    }

    fn same_content(&self) -> Result<bool> {
        Ok(self.read(&self.source)? == self.read(&self.target)?)
    }
}

impl Applicable for DotfileCopy<'_> {
    fn description(&self) -> String {
        self.target.file_name().map_or_else(
            || self.target.display().to_string(),
            |n| n.to_string_lossy().to_string(),
        )
    }

    fn apply(&self) -> Result<ResourceChange> {
        if self.fs_ops.exists(&self.target) {
            if self.same_content()? {
                return Ok(ResourceChange::AlreadyCorrect);
            }
            let backup = self.backup_path();
            std::fs::rename(&self.target, &backup).with_context(|| {
                format!("back up {} to {}", self.target.display(), backup.display())
            })?;
        }
        std::fs::copy(&self.source, &self.target).with_context(|| {
            format!("copy {} to {}", self.source.display(), self.target.display())
        })?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for DotfileCopy<'_> {
    /// An unreadable target is reported as `Incorrect`, so the copy is
    /// attempted and its failure is counted against this file alone.
    fn current_state(&self) -> Result<ResourceState> {
        if !self.fs_ops.is_file(&self.source) {
            return Ok(ResourceState::Invalid {
                reason: format!("{} not found", self.source.display()),
            });
        }
        if !self.fs_ops.exists(&self.target) {
            return Ok(ResourceState::Missing);
        }
        Ok(match self.same_content() {
            Ok(true) => ResourceState::Correct,
            Ok(false) => ResourceState::Incorrect {
                current: "content differs".to_string(),
            },
            Err(e) => ResourceState::Incorrect {
                current: format!("unreadable: {e:#}"),
            },
        })
    }
}
