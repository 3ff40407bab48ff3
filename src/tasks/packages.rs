use anyhow::Result;

use super::helpers::require_tool;
use super::{Context, ProcessOpts, Task, TaskResult, TaskStats, process_resources};
use crate::resources::package::{BrewPackage, PackageKind};

/// Tap that used to carry the font casks.
const FONTS_TAP: &str = "homebrew/cask-fonts";

/// Fail unless `brew` resolves on `PATH`.
///
/// # Errors
///
/// Returns an error naming the Homebrew step when `brew` is missing.
pub fn require_brew(ctx: &Context) -> Result<()> {
    require_tool(ctx, "brew", "run `macsetup step homebrew` first")
}

/// Install one batch of packages, logging a `label: ...` summary line.
///
/// Blank names are counted as skipped. Individual install failures are
/// counted, never fatal.
///
/// # Errors
///
/// Returns an error only if a probe cannot be spawned.
pub fn install_batch(
    ctx: &Context,
    label: &str,
    names: &[String],
    kind: PackageKind,
) -> Result<TaskStats> {
    if names.is_empty() {
        return Ok(TaskStats::new());
    }
    let (valid, blank): (Vec<&String>, Vec<&String>) =
        names.iter().partition(|n| !n.trim().is_empty());

    let resources = valid
        .into_iter()
        .map(|name| BrewPackage::new(name.trim(), kind, &*ctx.executor));
    let mut stats = process_resources(ctx, resources, &ProcessOpts::install_missing("install"))?;
    stats.skipped += u32::try_from(blank.len()).unwrap_or(u32::MAX);

    stats.log_batch(ctx, label);
    Ok(stats)
}

/// Install the configured formulae, fonts and casks.
#[derive(Debug)]
pub struct InstallPackages;

impl Task for InstallPackages {
    fn name(&self) -> &'static str {
        "Install packages"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let config = &ctx.config;
        if config.brew_formulae.is_empty()
            && config.brew_fonts.is_empty()
            && config.brew_casks.is_empty()
        {
            return Ok(TaskResult::Skipped("no packages configured".to_string()));
        }
        require_brew(ctx)?;

        let mut stats = install_batch(ctx, "Formulae", &config.brew_formulae, PackageKind::Formula)?;

        if !config.brew_fonts.is_empty() {
            if ctx.dry_run {
                ctx.log.dry_run(&format!("would run: brew tap {FONTS_TAP}"));
            } else {
                let tap = ctx.executor.run_unchecked("brew", &["tap", FONTS_TAP])?;
                if !tap.success {
                    ctx.log
                        .debug(&format!("brew tap {FONTS_TAP} failed: {}", tap.stderr.trim()));
                }
            }
        }
        stats += install_batch(ctx, "Fonts", &config.brew_fonts, PackageKind::Cask)?;
        stats += install_batch(ctx, "Casks", &config.brew_casks, PackageKind::Cask)?;

        Ok(stats.finish(ctx))
    }
}
