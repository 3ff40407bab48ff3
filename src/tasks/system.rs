use std::path::PathBuf;

use anyhow::{Context as _, Result};

use super::helpers::write_preferences;
use super::{Context, Task, TaskResult};
use crate::config::SystemConfig;
use crate::exec::Executor;
use crate::resources::preference::{PrefValue, PreferenceWrite};

const GLOBAL: &str = "NSGlobalDomain";
const TRACKPAD: &str = "com.apple.driver.AppleBluetoothMultitouch.trackpad";
const SCREENCAPTURE: &str = "com.apple.screencapture";

/// Expand `~` in the configured screenshot location against `home`.
#[must_use]
pub fn screenshot_dir(location: &str, home: &std::path::Path) -> PathBuf {
    let home = home.to_string_lossy().into_owned();
    PathBuf::from(shellexpand::tilde_with_context(location, || Some(home.as_str())).into_owned())
}

/// Preference writes for the configured system keys, in a fixed order.
#[must_use]
pub fn system_writes<'a>(
    config: &SystemConfig,
    screenshots: Option<&std::path::Path>,
    executor: &'a dyn Executor,
) -> Vec<PreferenceWrite<'a>> {
    let write = |domain, key, value| PreferenceWrite::new(domain, key, value, executor);
    let mut writes = Vec::new();

    if let Some(rate) = config.key_repeat_rate {
        writes.push(write(GLOBAL, "KeyRepeat", PrefValue::Int(rate)));
    }
    if let Some(delay) = config.initial_key_repeat {
        writes.push(write(GLOBAL, "InitialKeyRepeat", PrefValue::Int(delay)));
    }
    if config.tap_to_click == Some(true) {
        writes.push(write(TRACKPAD, "Clicking", PrefValue::Bool(true)));
        writes.push(write(GLOBAL, "com.apple.mouse.tapBehavior", PrefValue::Int(1)).current_host());
    }
    if let Some(speed) = config.tracking_speed {
        writes.push(write(GLOBAL, "com.apple.trackpad.scaling", PrefValue::Float(speed)));
    }
    if config.disable_auto_correct == Some(true) {
        writes.push(write(
            GLOBAL,
            "NSAutomaticSpellingCorrectionEnabled",
            PrefValue::Bool(false),
        ));
    }
    if config.disable_auto_capitalize == Some(true) {
        writes.push(write(
            GLOBAL,
            "NSAutomaticCapitalizationEnabled",
            PrefValue::Bool(false),
        ));
    }
    if let Some(dir) = screenshots {
        writes.push(write(
            SCREENCAPTURE,
            "location",
            PrefValue::String(dir.to_string_lossy().into_owned()),
        ));
    }
    if let Some(show) = config.screenshot_show_thumbnail {
        writes.push(write(SCREENCAPTURE, "show-thumbnail", PrefValue::Bool(show)));
    }
    writes
}

/// Write keyboard, trackpad, text and screenshot preferences.
#[derive(Debug)]
pub struct ConfigureSystem;

impl Task for ConfigureSystem {
    fn name(&self) -> &'static str {
        "Configure system preferences"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let config = &ctx.config.system;
        let screenshots = config
            .screenshot_location
            .as_deref()
            .map(|location| screenshot_dir(location, &ctx.home));

        let writes = system_writes(config, screenshots.as_deref(), &*ctx.executor);
        if writes.is_empty() {
            return Ok(TaskResult::Skipped("no system settings configured".to_string()));
        }

        if let Some(dir) = &screenshots {
            if ctx.dry_run {
                ctx.log
                    .dry_run(&format!("would create {}", dir.display()));
            } else {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("create screenshot directory {}", dir.display()))?;
            }
        }

        let stats = write_preferences(ctx, writes)?;
        Ok(stats.finish(ctx))
    }
}
