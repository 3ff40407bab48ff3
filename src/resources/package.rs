//! Homebrew package resource.
use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// Kinds of Homebrew package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// Command-line formula.
    Formula,
    /// GUI application or font, installed with `--cask`.
    Cask,
}

impl std::fmt::Display for PackageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Formula => write!(f, "formula"),
            Self::Cask => write!(f, "cask"),
        }
    }
}

/// A Homebrew package that can be checked and installed.
#[derive(Debug)]
pub struct BrewPackage<'a> {
    /// Formula or cask token.
    pub name: String,
    /// Whether this is a formula or a cask.
    pub kind: PackageKind,
    executor: &'a dyn Executor,
}

impl<'a> BrewPackage<'a> {
    /// Create a new package resource.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PackageKind, executor: &'a dyn Executor) -> Self {
        Self {
            name: name.into(),
            kind,
            executor,
        }
    }

    fn args<'s>(&'s self, verb: &'s str) -> Vec<&'s str> {
        match self.kind {
            PackageKind::Formula => vec![verb, self.name.as_str()],
            PackageKind::Cask => vec![verb, "--cask", self.name.as_str()],
        }
    }
}

impl Applicable for BrewPackage<'_> {
    fn description(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.executor.run("brew", &self.args("install"))?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for BrewPackage<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        let result = self.executor.run_unchecked("brew", &self.args("list"))?;
        if result.success {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }
}
