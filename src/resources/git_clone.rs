//! Repositories cloned into a fixed location.
use std::path::PathBuf;

use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;
use crate::operations::FileSystemOps;

/// A git repository that should exist at `dest`.
///
/// Presence of `dest` is the whole probe: an existing directory is never
/// pulled or re-cloned.
#[derive(Debug)]
pub struct GitClone<'a> {
    /// Short name used in log lines.
    pub name: String,
    pub url: String,
    pub dest: PathBuf,
    executor: &'a dyn Executor,
    fs_ops: &'a dyn FileSystemOps,
}

impl<'a> GitClone<'a> {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        dest: PathBuf,
        executor: &'a dyn Executor,
        fs_ops: &'a dyn FileSystemOps,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            dest,
            executor,
            fs_ops,
        }
    }
}

impl Applicable for GitClone<'_> {
    fn description(&self) -> String {
        self.name.clone()
    }

    fn apply(&self) -> Result<ResourceChange> {
        let dest = self.dest.to_string_lossy();
        self.executor.run("git", &["clone", &self.url, &dest])?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for GitClone<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if self.fs_ops.exists(&self.dest) {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }
}
