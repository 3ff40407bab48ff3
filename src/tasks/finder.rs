use anyhow::Result;

use super::helpers::{restart_app, write_preferences};
use super::{Context, Task, TaskResult};
use crate::config::{FinderConfig, ViewStyle};
use crate::exec::Executor;
use crate::resources::preference::{PrefValue, PreferenceWrite};

const FINDER: &str = "com.apple.finder";

/// Preference writes for the configured Finder keys, in a fixed order.
///
/// An unknown `default_view` writes nothing (it is reported at load time).
#[must_use]
pub fn finder_writes<'a>(config: &FinderConfig, executor: &'a dyn Executor) -> Vec<PreferenceWrite<'a>> {
    let mut writes = Vec::new();
    if let Some(style) = config.default_view.as_deref().and_then(ViewStyle::from_name) {
        writes.push(PreferenceWrite::new(
            FINDER,
            "FXPreferredViewStyle",
            PrefValue::String(style.code().to_string()),
            executor,
        ));
    }
    let flags = [
        ("ShowPathbar", config.show_path_bar),
        ("ShowStatusBar", config.show_status_bar),
        ("AppleShowAllFiles", config.show_hidden_files),
    ];
    for (key, value) in flags {
        if let Some(value) = value {
            writes.push(PreferenceWrite::new(FINDER, key, PrefValue::Bool(value), executor));
        }
    }
    writes
}

/// Write Finder preferences and restart Finder.
///
/// Finder is restarted even when nothing was written.
#[derive(Debug)]
pub struct ConfigureFinder;

impl Task for ConfigureFinder {
    fn name(&self) -> &'static str {
        "Configure Finder"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let writes = finder_writes(&ctx.config.finder, &*ctx.executor);
        if writes.is_empty() {
            ctx.log.debug("no Finder settings configured");
        }
        let stats = write_preferences(ctx, writes)?;
        restart_app(ctx, "Finder")?;
        Ok(stats.finish(ctx))
    }
}
