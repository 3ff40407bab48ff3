use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::installer::RemoteInstaller;

/// Install Homebrew if needed, then refresh its formula index.
#[derive(Debug)]
pub struct InstallHomebrew;

impl Task for InstallHomebrew {
    fn name(&self) -> &'static str {
        "Install Homebrew"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let installer = RemoteInstaller::homebrew(&*ctx.executor, &*ctx.fs_ops);
        let stats = process_resources(ctx, [installer], &ProcessOpts::apply_all("install"))?;
        if stats.already_ok > 0 {
            ctx.log.info("Homebrew is already installed");
        }

        if ctx.dry_run {
            ctx.log.dry_run("would run: brew update");
            return Ok(TaskResult::DryRun);
        }

        if ctx.executor.which("brew") {
            ctx.log.info("updating Homebrew");
            ctx.executor.run("brew", &["update"])?;
        } else {
            // Fresh installs live outside the inherited PATH.
            ctx.log
                .warn("brew is not on PATH yet; open a new shell before installing packages");
        }
        Ok(TaskResult::Ok)
    }
}
