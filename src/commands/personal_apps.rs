//! Command: install the personal (non-work) casks.
use std::sync::Arc;

use anyhow::Result;

use super::CommandSetup;
use super::setup::{Prompter, TerminalPrompter};
use crate::cli::{GlobalOpts, PersonalAppsOpts};
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger};
use crate::resources::package::PackageKind;
use crate::tasks::Context;
use crate::tasks::packages::{install_batch, require_brew};

/// Run the personal-apps command.
///
/// # Errors
///
/// Returns an error if configuration loading fails or `brew` is missing.
pub fn run(global: &GlobalOpts, opts: &PersonalAppsOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let ctx = setup.into_context(
        Arc::clone(log) as Arc<dyn Log>,
        global.dry_run,
        Arc::new(SystemExecutor),
    )?;
    install(&ctx, opts.yes, &TerminalPrompter)
}

/// List the configured casks, confirm unless `yes`, then install them.
///
/// Declining is not an error. Individual install failures are counted in
/// the batch summary, never fatal.
///
/// # Errors
///
/// Returns an error if `brew` is missing or a probe cannot be spawned.
pub fn install(ctx: &Context, yes: bool, prompter: &dyn Prompter) -> Result<()> {
    let apps = ctx.config.personal_apps();
    ctx.log.stage("Personal apps");
    ctx.log.info("The following applications will be installed:");
    for app in &apps {
        ctx.log.info(&format!("  - {app}"));
    }

    if !yes && !ctx.dry_run && !prompter.confirm("Proceed with installation?") {
        ctx.log.info("Installation cancelled");
        return Ok(());
    }

    require_brew(ctx)?;
    install_batch(ctx, "Personal apps", &apps, PackageKind::Cask)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::commands::setup::MockPrompter;
    use crate::config::Config;
    use crate::resources::test_helpers::RecordingExecutor;
    use crate::tasks::test_helpers::make_context_with;

    fn two_apps() -> Config {
        toml::from_str(r#"personal_apps = ["vlc", "keka"]"#).unwrap()
    }

    #[test]
    fn declining_installs_nothing() {
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().times(1).return_const(false);
        let (ctx, _, exec) = make_context_with(two_apps(), RecordingExecutor::new());
        install(&ctx, false, &prompter).unwrap();
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn yes_skips_prompt_and_installs_missing_casks() {
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().never();
        let exec = RecordingExecutor::new()
            .with_which("brew")
            .failing("brew list --cask vlc");
        let (ctx, _, exec) = make_context_with(two_apps(), exec);
        install(&ctx, true, &prompter).unwrap();
        assert_eq!(
            exec.calls_except(&["brew list"]),
            vec!["brew install --cask vlc"]
        );
    }

    #[test]
    fn install_failures_are_not_fatal() {
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().return_const(true);
        let exec = RecordingExecutor::new()
            .with_which("brew")
            .failing("brew list")
            .failing("brew install --cask keka");
        let (ctx, _, exec) = make_context_with(two_apps(), exec);
        install(&ctx, false, &prompter).unwrap();
        assert_eq!(exec.calls_except(&["brew list"]).len(), 2);
    }

    #[test]
    fn missing_brew_fails_after_confirmation() {
        let mut prompter = MockPrompter::new();
        prompter.expect_confirm().return_const(true);
        let (ctx, _, _) = make_context_with(two_apps(), RecordingExecutor::new());
        let err = install(&ctx, false, &prompter).unwrap_err();
        assert!(err.to_string().contains("brew is not installed"));
    }
}
