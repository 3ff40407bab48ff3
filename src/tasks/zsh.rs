use anyhow::{Result, bail};

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::git_clone::GitClone;
use crate::resources::installer::RemoteInstaller;
use crate::resources::shell::{LoginShell, ZSH_PATH};

/// Install Oh My Zsh, make zsh the login shell and clone the plugins.
#[derive(Debug)]
pub struct InstallOhMyZsh;

impl Task for InstallOhMyZsh {
    fn name(&self) -> &'static str {
        "Install Oh My Zsh"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.optional.install_oh_my_zsh
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let executor = &*ctx.executor;
        let fs_ops = &*ctx.fs_ops;

        let installer = RemoteInstaller::oh_my_zsh(ctx.oh_my_zsh_dir(), executor, fs_ops);
        let mut stats = process_resources(ctx, [installer], &ProcessOpts::apply_all("install"))?;

        // chsh failing leaves a working framework behind.
        let shell = LoginShell::new(ZSH_PATH, ctx.login_shell.as_str(), executor);
        stats += process_resources(ctx, [shell], &ProcessOpts::apply_all("set").no_bail())?;

        let plugins_dir = ctx.zsh_plugins_dir();
        let plugins = ctx.config.zsh_plugins().into_iter().map(|(name, url)| {
            let dest = plugins_dir.join(&name);
            GitClone::new(name, url, dest, executor, fs_ops)
        });
        let plugin_stats =
            process_resources(ctx, plugins, &ProcessOpts::install_missing("clone"))?;
        plugin_stats.log_batch(ctx, "Plugins");
        if plugin_stats.failed > 0 {
            bail!(
                "{} of {} plugin(s) failed to clone",
                plugin_stats.failed,
                plugin_stats.total()
            );
        }
        stats += plugin_stats;

        Ok(stats.finish(ctx))
    }
}
