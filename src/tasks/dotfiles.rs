use anyhow::{Result, bail};

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::dotfile::{BACKUP_STAMP_FORMAT, DOTFILES, DotfileCopy};

/// Copy the shell dotfiles into the home directory.
#[derive(Debug)]
pub struct CopyDotfiles;

impl Task for CopyDotfiles {
    fn name(&self) -> &'static str {
        "Copy dotfiles"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.optional.copy_dotfiles
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let source_dir = ctx.dotfiles_dir();
        if !ctx.fs_ops.is_dir(&source_dir) {
            bail!("dotfiles directory not found: {}", source_dir.display());
        }

        let stamp = chrono::Local::now()
            .format(BACKUP_STAMP_FORMAT)
            .to_string();
        let copies = DOTFILES.iter().map(|name| {
            DotfileCopy::new(
                source_dir.join(name),
                ctx.home.join(name),
                stamp.clone(),
                &*ctx.fs_ops,
            )
        });
        let stats = process_resources(ctx, copies, &ProcessOpts::apply_all("copy").no_bail())?;

        if stats.failed > 0 {
            bail!("{} dotfile(s) could not be copied", stats.failed);
        }
        if stats.changed + stats.already_ok == 0 {
            bail!("no dotfiles were copied");
        }
        Ok(stats.finish(ctx))
    }
}
