pub mod personal_apps;
pub mod setup;
pub mod step;
pub mod version;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::exec::Executor;
use crate::logging::{Log, Logger};
use crate::tasks::Context;

/// Environment variable naming the project root.
pub const ROOT_ENV: &str = "MACSETUP_ROOT";

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    pub root: PathBuf,
    pub config: Config,
}

impl CommandSetup {
    /// Resolve the project root and load the configuration.
    ///
    /// Validation warnings are logged, never fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be determined or the
    /// configuration cannot be loaded.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let root = resolve_root(global)?;
        let path = config_path(&root, global.config.as_deref());

        log.stage("Loading configuration");
        log.debug(&format!("config file: {}", path.display()));
        let config = Config::load(&path)?;
        log.info(&format!(
            "loaded {} formulae, {} casks, {} fonts",
            config.brew_formulae.len(),
            config.brew_casks.len(),
            config.brew_fonts.len()
        ));

        let warnings = config.validate();
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {} configuration warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!(
                    "  {} [{}]: {}",
                    warning.source, warning.item, warning.message
                ));
            }
        }

        Ok(Self { root, config })
    }

    /// Build the step context.
    ///
    /// # Errors
    ///
    /// Returns an error if `HOME` is not set.
    pub fn into_context(
        self,
        log: Arc<dyn Log>,
        dry_run: bool,
        executor: Arc<dyn Executor>,
    ) -> Result<Context> {
        Context::new(Arc::new(self.config), self.root, log, dry_run, executor)
    }
}

/// The configuration file path; relative overrides resolve against `root`.
#[must_use]
pub fn config_path(root: &Path, config: Option<&Path>) -> PathBuf {
    match config {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => root.join(path),
        None => root.join(DEFAULT_CONFIG_FILE),
    }
}

/// Resolve the project root from CLI arguments or auto-detection.
///
/// Order: `--root`, `MACSETUP_ROOT`, directories around the executable that
/// contain a configuration file, then the current directory.
///
/// # Errors
///
/// Returns an error if no candidate holds a configuration file.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref root) = global.root {
        return Ok(root.clone());
    }

    if let Ok(root) = std::env::var(ROOT_ENV) {
        return Ok(PathBuf::from(root));
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        let candidates = [
            parent.join("../.."), // target/release/ → project root
            parent.join(".."),    // bin/ → project root
            parent.to_path_buf(),
        ];
        for candidate in &candidates {
            if candidate.join(DEFAULT_CONFIG_FILE).is_file() {
                return Ok(dunce::canonicalize(candidate)?);
            }
        }
    }

    let cwd = std::env::current_dir()?;
    if cwd.join(DEFAULT_CONFIG_FILE).is_file() {
        return Ok(cwd);
    }

    anyhow::bail!("cannot determine project root. Use --root or set {ROOT_ENV}");
}
