//! Command: run a single setup step.
use std::sync::Arc;

use anyhow::Result;

use super::CommandSetup;
use crate::cli::{GlobalOpts, StepOpts};
use crate::error::StepError;
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger, TaskStatus};
use crate::tasks::{self, Context, StepId};

/// Run the step command.
///
/// # Errors
///
/// Returns an error if configuration loading fails or the step fails.
pub fn run(global: &GlobalOpts, opts: &StepOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let ctx = setup.into_context(
        Arc::clone(log) as Arc<dyn Log>,
        global.dry_run,
        Arc::new(SystemExecutor),
    )?;
    run_one(&ctx, opts.name, log)
}

/// Execute one step without privilege elevation.
///
/// # Errors
///
/// Returns [`StepError::Failed`] when the step fails.
pub fn run_one(ctx: &Context, step: StepId, log: &Logger) -> Result<()> {
    let task = step.task();
    let status = tasks::execute(task.as_ref(), ctx);
    log.print_summary();

    if status == TaskStatus::Failed {
        let reason = log
            .task_entries()
            .into_iter()
            .rev()
            .find_map(|entry| entry.message)
            .unwrap_or_default();
        return Err(StepError::Failed {
            step: task.name().to_string(),
            reason,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::resources::test_helpers::RecordingExecutor;
    use crate::tasks::test_helpers::make_context_with;

    #[test]
    fn successful_step_is_ok() {
        let config: Config = toml::from_str("[finder]\nshow_path_bar = true\n").unwrap();
        let (ctx, log, exec) = make_context_with(config, RecordingExecutor::new());
        run_one(&ctx, StepId::Finder, &log).unwrap();
        assert_eq!(
            exec.calls(),
            vec![
                "defaults write com.apple.finder ShowPathbar -bool true",
                "killall Finder"
            ]
        );
    }

    #[test]
    fn failed_step_reports_reason() {
        let config: Config = toml::from_str("brew_formulae = [\"wget\"]\n").unwrap();
        let (ctx, log, _) = make_context_with(config, RecordingExecutor::new());
        let err = run_one(&ctx, StepId::Packages, &log).unwrap_err();
        match err.downcast_ref::<StepError>() {
            Some(StepError::Failed { step, reason }) => {
                assert_eq!(step, "Install packages");
                assert!(reason.contains("brew is not installed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn skipped_step_is_not_an_error() {
        let (ctx, log, exec) = make_context_with(Config::default(), RecordingExecutor::new());
        run_one(&ctx, StepId::Dock, &log).unwrap();
        assert!(exec.calls().is_empty());
    }
}
