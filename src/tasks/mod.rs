//! Named setup steps that orchestrate resource changes.
mod context;
pub mod dock;
pub mod dotfiles;
pub mod finder;
pub mod git_config;
pub mod helpers;
pub mod homebrew;
pub mod nvchad;
pub mod packages;
mod processing;
pub mod system;
pub mod zsh;

pub use context::Context;
pub use processing::{
    ProcessOpts, TaskResult, TaskStats, process_applicable, process_resources,
};

use anyhow::Result;

use crate::logging::TaskStatus;

/// A named, executable setup step.
pub trait Task: Send + Sync {
    /// Human-readable step name.
    fn name(&self) -> &str;

    /// Whether this step is enabled by the configuration.
    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    /// Execute the step.
    ///
    /// # Errors
    ///
    /// Returns an error if a required tool is missing or a checked command
    /// fails.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// Identifiers for every step, in full-run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StepId {
    Homebrew,
    Packages,
    Finder,
    System,
    Git,
    Zsh,
    Nvchad,
    Dotfiles,
    Dock,
}

impl StepId {
    /// Every step, in full-run order.
    pub const ALL: [Self; 9] = [
        Self::Homebrew,
        Self::Packages,
        Self::Finder,
        Self::System,
        Self::Git,
        Self::Zsh,
        Self::Nvchad,
        Self::Dotfiles,
        Self::Dock,
    ];

    /// Build the step implementation.
    #[must_use]
    pub fn task(self) -> Box<dyn Task> {
        match self {
            Self::Homebrew => Box::new(homebrew::InstallHomebrew),
            Self::Packages => Box::new(packages::InstallPackages),
            Self::Finder => Box::new(finder::ConfigureFinder),
            Self::System => Box::new(system::ConfigureSystem),
            Self::Git => Box::new(git_config::ConfigureGit),
            Self::Zsh => Box::new(zsh::InstallOhMyZsh),
            Self::Nvchad => Box::new(nvchad::InstallNvChad),
            Self::Dotfiles => Box::new(dotfiles::CopyDotfiles),
            Self::Dock => Box::new(dock::ConfigureDock),
        }
    }
}

/// Run `task` unless its toggle is off, and record the outcome.
///
/// Errors never escape: they are logged, recorded as
/// [`TaskStatus::Failed`], and left to the caller's failure policy.
pub fn execute(task: &dyn Task, ctx: &Context) -> TaskStatus {
    let name = task.name();
    if !task.should_run(ctx) {
        ctx.log.debug(&format!("{name}: disabled in [optional]"));
        ctx.log.record_task(name, TaskStatus::NotApplicable, None);
        return TaskStatus::NotApplicable;
    }

    ctx.log.stage(name);
    let (status, message) = match task.run(ctx) {
        Ok(TaskResult::Ok) => (TaskStatus::Ok, None),
        Ok(TaskResult::DryRun) => (TaskStatus::DryRun, None),
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            (TaskStatus::Skipped, Some(reason))
        }
        Err(e) => {
            let chain = format!("{e:#}");
            ctx.log.error(&format!("{name}: {chain}"));
            (TaskStatus::Failed, Some(chain))
        }
    };
    ctx.log.record_task(name, status, message.as_deref());
    status
}

/// Shared helpers for step unit tests.
#[cfg(test)]
pub mod test_helpers {
    use std::path::PathBuf;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::logging::{Log, Logger};
    use crate::operations::MockFileSystemOps;
    use crate::resources::test_helpers::RecordingExecutor;

    use super::Context;

    /// Build a [`Context`] with a default [`RecordingExecutor`].
    #[must_use]
    pub fn make_context(config: Config) -> (Context, Arc<Logger>, Arc<RecordingExecutor>) {
        make_context_with(config, RecordingExecutor::new())
    }

    /// Build a [`Context`] around the given executor. Nothing exists on the
    /// mock filesystem; use [`Context::with_fs_ops`] to change that.
    #[must_use]
    pub fn make_context_with(
        config: Config,
        executor: RecordingExecutor,
    ) -> (Context, Arc<Logger>, Arc<RecordingExecutor>) {
        let log = Arc::new(Logger::new());
        let executor = Arc::new(executor);
        let ctx = Context {
            config: Arc::new(config),
            root: PathBuf::from("/repo"),
            log: Arc::clone(&log) as Arc<dyn Log>,
            dry_run: false,
            home: PathBuf::from("/Users/test"),
            login_shell: "/bin/zsh".to_string(),
            executor: Arc::clone(&executor) as Arc<dyn crate::exec::Executor>,
            fs_ops: Arc::new(MockFileSystemOps::new()),
        };
        (ctx, log, executor)
    }
}
