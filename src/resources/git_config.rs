//! Global git configuration entries.
use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// A `git config --global` entry that can be probed and written.
#[derive(Debug)]
pub struct GitConfigEntry<'a> {
    /// Dotted key (e.g. `user.email`).
    pub key: String,
    /// Desired value.
    pub value: String,
    executor: &'a dyn Executor,
}

impl<'a> GitConfigEntry<'a> {
    /// Create a new git config entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>, executor: &'a dyn Executor) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            executor,
        }
    }
}

impl Applicable for GitConfigEntry<'_> {
    fn description(&self) -> String {
        format!("git {} = {}", self.key, self.value)
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.executor
            .run("git", &["config", "--global", &self.key, &self.value])?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for GitConfigEntry<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        // `--get` exits 1 for an unset key.
        let result = self
            .executor
            .run_unchecked("git", &["config", "--global", "--get", &self.key])?;
        let current = result.stdout.trim();

        if !result.success || current.is_empty() {
            Ok(ResourceState::Missing)
        } else if current == self.value {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: current.to_string(),
            })
        }
    }
}
