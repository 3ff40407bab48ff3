use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// Login shell set by the Oh My Zsh step.
pub const ZSH_PATH: &str = "/bin/zsh";

/// The operator's login shell.
#[derive(Debug)]
pub struct LoginShell<'a> {
    /// Absolute path of the desired shell.
    target: String,
    /// Current value of `$SHELL`, empty when unset.
    current: String,
    executor: &'a dyn Executor,
}

impl<'a> LoginShell<'a> {
    #[must_use]
    pub fn new(target: impl Into<String>, current: impl Into<String>, executor: &'a dyn Executor) -> Self {
        Self {
            target: target.into(),
            current: current.into(),
            executor,
        }
    }

    fn target_name(&self) -> &str {
        self.target.rsplit('/').next().unwrap_or(&self.target)
    }
}

impl Applicable for LoginShell<'_> {
    fn description(&self) -> String {
        format!("login shell → {}", self.target)
    }

    fn apply(&self) -> Result<ResourceChange> {
        // chsh asks for the account password.
        self.executor.run_interactive("chsh", &["-s", &self.target])?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for LoginShell<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if self.current.is_empty() {
            Ok(ResourceState::Missing)
        } else if self.current.rsplit('/').next() == Some(self.target_name()) {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: self.current.clone(),
            })
        }
    }
}
