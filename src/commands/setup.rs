//! Command: the orchestrated setup run.
use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use super::CommandSetup;
use crate::cli::{GlobalOpts, ModeOpts, OnError};
use crate::error::StepError;
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger, TaskStatus};
use crate::platform;
use crate::tasks::{self, Context, StepId};

/// Follow-ups the tool cannot automate, printed after a full run.
pub const MANUAL_STEPS: &[&str] = &[
    "1. Sign in to 1Password and sync passwords",
    "2. Run 'nvim' to complete NvChad setup",
    "3. Configure SSH keys:",
    "     ssh-keygen -t ed25519 -C \"your_email@example.com\"",
    "4. Set up VS Code Settings Sync",
    "5. Install browsers manually (Chrome, Firefox, Arc)",
    "6. Restart your Mac for all changes to take effect",
    "7. Open iTerm2 and set JetBrains Mono Nerd Font",
];

/// Which subset of the steps an orchestrated run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Full,
    BrewOnly,
    ConfigOnly,
    DotfilesOnly,
}

impl RunMode {
    /// Steps covered by this mode, in execution order.
    #[must_use]
    pub fn steps(self) -> &'static [StepId] {
        match self {
            Self::Full => &StepId::ALL,
            Self::BrewOnly => &[StepId::Homebrew, StepId::Packages],
            Self::ConfigOnly => &[StepId::Finder, StepId::System, StepId::Git, StepId::Dock],
            Self::DotfilesOnly => &[StepId::Dotfiles],
        }
    }

    const fn banner(self) -> &'static str {
        match self {
            Self::Full => "macOS Fresh Install Setup",
            Self::BrewOnly => "Running Homebrew-only installation",
            Self::ConfigOnly => "Applying system configurations only",
            Self::DotfilesOnly => "Copying dotfiles only",
        }
    }
}

impl From<&ModeOpts> for RunMode {
    fn from(opts: &ModeOpts) -> Self {
        if opts.brew_only {
            Self::BrewOnly
        } else if opts.config_only {
            Self::ConfigOnly
        } else if opts.dotfiles_only {
            Self::DotfilesOnly
        } else {
            Self::Full
        }
    }
}

/// Asks the operator a yes/no question.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Returns `true` only for an explicit yes.
    fn confirm(&self, question: &str) -> bool;
}

/// [`Prompter`] asking on the controlling terminal.
///
/// Anything but an explicit yes, including a missing terminal, is a no.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, question: &str) -> bool {
        dialoguer::Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Failure policy when `--on-error` is not given.
#[must_use]
pub fn default_policy() -> OnError {
    if std::io::stdin().is_terminal() {
        OnError::Prompt
    } else {
        OnError::Stop
    }
}

/// Run the orchestrated setup.
///
/// # Errors
///
/// Returns an error if configuration loading fails, privilege elevation
/// fails, the failure policy aborts the run, or any step failed.
pub fn run(global: &GlobalOpts, mode: RunMode, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("macsetup {}", super::version::version()));

    let setup = CommandSetup::init(global, log)?;
    let ctx = setup.into_context(
        Arc::clone(log) as Arc<dyn Log>,
        global.dry_run,
        Arc::new(SystemExecutor),
    )?;
    let policy = global.on_error.unwrap_or_else(default_policy);

    run_steps(&ctx, mode, policy, &TerminalPrompter, log)
}

/// Execute the steps of `mode` against an existing context.
///
/// # Errors
///
/// See [`run`].
pub fn run_steps(
    ctx: &Context,
    mode: RunMode,
    policy: OnError,
    prompter: &dyn Prompter,
    log: &Logger,
) -> Result<()> {
    log.stage(mode.banner());
    if !platform::is_macos() {
        log.warn("not running on macOS; most steps will fail");
    }

    if mode == RunMode::Full {
        elevate(ctx)?;
    }

    for step in mode.steps() {
        let task = step.task();
        let status = tasks::execute(task.as_ref(), ctx);
        if status == TaskStatus::Failed && !keep_going(policy, prompter) {
            log.print_summary();
            return Err(StepError::Aborted(task.name().to_string()).into());
        }
    }

    log.print_summary();

    let failed = log.failure_count();
    if failed > 0 {
        return Err(StepError::Incomplete(failed).into());
    }

    if mode == RunMode::Full && !ctx.dry_run {
        log.success("macOS setup complete!");
        log.stage("Manual steps remaining");
        for line in MANUAL_STEPS {
            log.info(&format!("  {line}"));
        }
    }
    Ok(())
}

/// Ask for the sudo password once, up front.
fn elevate(ctx: &Context) -> Result<()> {
    if ctx.dry_run {
        ctx.log.dry_run("would run: sudo -v");
        return Ok(());
    }
    ctx.log.info("This setup requires sudo access...");
    ctx.executor
        .run_interactive("sudo", &["-v"])
        .context("privilege elevation failed")?;
    Ok(())
}

fn keep_going(policy: OnError, prompter: &dyn Prompter) -> bool {
    match policy {
        OnError::Continue => true,
        OnError::Stop => false,
        OnError::Prompt => prompter.confirm("Continue anyway?"),
    }
}
