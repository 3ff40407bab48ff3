use anyhow::Result;

use super::helpers::{require_tool, restart_app, write_preferences};
use super::{Context, ProcessOpts, Task, TaskResult, TaskStats, process_applicable};
use crate::config::DockConfig;
use crate::exec::Executor;
use crate::resources::dock::{DockItem, resolve_app};
use crate::resources::preference::{PrefValue, PreferenceWrite};

const DOCK: &str = "com.apple.dock";

/// Preference writes for the configured Dock keys, in a fixed order.
#[must_use]
pub fn dock_writes<'a>(config: &DockConfig, executor: &'a dyn Executor) -> Vec<PreferenceWrite<'a>> {
    let mut writes = Vec::new();
    if let Some(size) = config.tile_size {
        writes.push(PreferenceWrite::new(DOCK, "tilesize", PrefValue::Int(size), executor));
    }
    if let Some(hide) = config.autohide {
        writes.push(PreferenceWrite::new(DOCK, "autohide", PrefValue::Bool(hide), executor));
    }
    if let Some(recents) = config.show_recents {
        writes.push(PreferenceWrite::new(
            DOCK,
            "show-recents",
            PrefValue::Bool(recents),
            executor,
        ));
    }
    writes
}

/// Replace the Dock items with the configured apps.
///
/// Unresolvable apps are skipped; failed additions are counted.
fn replace_apps(ctx: &Context, apps: &[String]) -> Result<TaskStats> {
    require_tool(
        ctx,
        "dockutil",
        "add it to brew_formulae and run `macsetup step packages`",
    )?;

    if ctx.dry_run {
        ctx.log.dry_run("would remove all Dock items");
    } else {
        ctx.log.info("removing existing Dock items");
        let cleared = ctx
            .executor
            .run_unchecked("dockutil", &["--remove", "all", "--no-restart"])?;
        if !cleared.success {
            ctx.log
                .debug(&format!("dockutil --remove all: {}", cleared.stderr.trim()));
        }
    }

    let mut unresolved = TaskStats::new();
    let mut items = Vec::new();
    for name in apps {
        match resolve_app(name, &*ctx.fs_ops) {
            Some(path) => items.push(DockItem::new(name.as_str(), path, &*ctx.executor)),
            None => {
                ctx.log.warn(&format!("{name} not installed (skipping)"));
                unresolved.skipped += 1;
            }
        }
    }

    let mut stats = process_applicable(ctx, items, &ProcessOpts::apply_all("add").no_bail())?;
    stats += unresolved;
    stats.log_batch(ctx, "Dock apps");
    Ok(stats)
}

/// Arrange Dock apps, write Dock preferences and restart the Dock.
///
/// The Dock is restarted even when nothing was written.
#[derive(Debug)]
pub struct ConfigureDock;

impl Task for ConfigureDock {
    fn name(&self) -> &'static str {
        "Configure Dock"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let config = &ctx.config.dock;
        let writes = dock_writes(config, &*ctx.executor);
        if config.apps.is_none() && writes.is_empty() {
            ctx.log.debug("no Dock settings configured");
        }

        let mut stats = TaskStats::new();
        if let Some(apps) = &config.apps {
            stats += replace_apps(ctx, apps)?;
        }
        stats += write_preferences(ctx, writes)?;
        restart_app(ctx, "Dock")?;
        Ok(stats.finish(ctx))
    }
}
