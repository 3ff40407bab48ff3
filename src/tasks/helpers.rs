//! Helpers shared by the preference-writing steps.

use anyhow::{Result, bail};

use super::{Context, ProcessOpts, TaskStats, process_applicable};
use crate::resources::preference::PreferenceWrite;

/// Fail unless `program` resolves on `PATH`.
///
/// # Errors
///
/// Returns an error carrying `hint` when the program is missing.
pub fn require_tool(ctx: &Context, program: &str, hint: &str) -> Result<()> {
    if !ctx.executor.which(program) {
        bail!("{program} is not installed; {hint}");
    }
    Ok(())
}

/// Write every preference once. The first failed write aborts the step.
///
/// # Errors
///
/// Returns the first `defaults write` failure.
pub fn write_preferences(ctx: &Context, writes: Vec<PreferenceWrite<'_>>) -> Result<TaskStats> {
    process_applicable(ctx, writes, &ProcessOpts::apply_all("write"))
}

/// Restart a system app so it rereads its preferences.
///
/// # Errors
///
/// Returns an error if `killall` fails.
pub fn restart_app(ctx: &Context, app: &str) -> Result<()> {
    if ctx.dry_run {
        ctx.log.dry_run(&format!("would restart {app}"));
        return Ok(());
    }
    ctx.log.info(&format!("restarting {app}"));
    ctx.executor.run("killall", &[app])?;
    Ok(())
}
