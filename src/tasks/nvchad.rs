use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::git_clone::GitClone;

/// NvChad starter configuration.
pub const NVCHAD_STARTER_URL: &str = "https://github.com/NvChad/starter";

/// Clone the NvChad starter into `~/.config/nvim`.
#[derive(Debug)]
pub struct InstallNvChad;

impl Task for InstallNvChad {
    fn name(&self) -> &'static str {
        "Install NvChad"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.optional.install_nvchad
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let nvim_dir = ctx.nvim_dir();
        // Never clobber an existing Neovim config.
        if ctx.fs_ops.exists(&nvim_dir) {
            ctx.log.info(&format!(
                "to reinstall, back up and remove {}",
                nvim_dir.display()
            ));
            return Ok(TaskResult::Skipped("Neovim config already exists".to_string()));
        }

        let starter = GitClone::new(
            "NvChad",
            NVCHAD_STARTER_URL,
            nvim_dir,
            &*ctx.executor,
            &*ctx.fs_ops,
        );
        let stats = process_resources(ctx, [starter], &ProcessOpts::apply_all("clone"))?;
        if !ctx.dry_run {
            ctx.log
                .info("run 'nvim' to finish NvChad setup (plugins install on first launch)");
        }
        Ok(stats.finish(ctx))
    }
}
