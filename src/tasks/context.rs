use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::config::Config;
use crate::exec::Executor;
use crate::logging::Log;
use crate::operations::{FileSystemOps, SystemFileSystemOps};

/// Everything a step needs: the loaded document, where things live, and
/// the injectable side-effect seams.
#[derive(Clone)]
pub struct Context {
    pub config: Arc<Config>,
    /// Holds `config.toml` and `dotfiles/`.
    pub root: PathBuf,
    pub log: Arc<dyn Log>,
    /// Report changes instead of making them.
    pub dry_run: bool,
    pub home: PathBuf,
    /// `$SHELL` at startup; empty when unset.
    pub login_shell: String,
    pub executor: Arc<dyn Executor>,
    pub fs_ops: Arc<dyn FileSystemOps>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("root", &self.root)
            .field("home", &self.home)
            .field("login_shell", &self.login_shell)
            .field("dry_run", &self.dry_run)
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Build a context around the real filesystem.
    ///
    /// # Errors
    ///
    /// Fails when `HOME` is unset.
    pub fn new(
        config: Arc<Config>,
        root: PathBuf,
        log: Arc<dyn Log>,
        dry_run: bool,
        executor: Arc<dyn Executor>,
    ) -> Result<Self> {
        let home = std::env::var_os("HOME").context("HOME environment variable is not set")?;
        Ok(Self {
            config,
            root,
            log,
            dry_run,
            home: PathBuf::from(home),
            login_shell: std::env::var("SHELL").unwrap_or_default(),
            executor,
            fs_ops: Arc::new(SystemFileSystemOps),
        })
    }

    #[must_use]
    pub fn dotfiles_dir(&self) -> PathBuf {
        self.root.join("dotfiles")
    }

    #[must_use]
    pub fn oh_my_zsh_dir(&self) -> PathBuf {
        self.home.join(".oh-my-zsh")
    }

    /// `custom/plugins` under the Oh My Zsh install.
    #[must_use]
    pub fn zsh_plugins_dir(&self) -> PathBuf {
        self.oh_my_zsh_dir().join("custom/plugins")
    }

    #[must_use]
    pub fn nvim_dir(&self) -> PathBuf {
        self.home.join(".config/nvim")
    }

    /// Same context, different filesystem view.
    #[must_use]
    pub fn with_fs_ops(&self, fs_ops: Arc<dyn FileSystemOps>) -> Self {
        Self {
            fs_ops,
            ..self.clone()
        }
    }
}
