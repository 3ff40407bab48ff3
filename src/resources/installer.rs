//! Remote install scripts (Homebrew, Oh My Zsh).
use std::path::PathBuf;

use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;
use crate::operations::FileSystemOps;

/// Official Homebrew install script.
pub const HOMEBREW_INSTALL_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

/// Official Oh My Zsh install script.
pub const OH_MY_ZSH_INSTALL_URL: &str =
    "https://raw.githubusercontent.com/ohmyzsh/ohmyzsh/master/tools/install.sh";

/// How to tell whether the installer already ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallProbe {
    /// The program resolves on `PATH`.
    OnPath(&'static str),
    /// The directory exists.
    DirExists(PathBuf),
}

/// A downloaded install script run attached to the terminal.
///
/// `command_line` is handed to `<shell> -c` so the `$(curl ...)` substitution
/// happens in a shell and the script keeps the terminal as its stdin.
#[derive(Debug)]
pub struct RemoteInstaller<'a> {
    name: &'static str,
    probe: InstallProbe,
    shell: &'static str,
    command_line: String,
    executor: &'a dyn Executor,
    fs_ops: &'a dyn FileSystemOps,
}

impl<'a> RemoteInstaller<'a> {
    /// The Homebrew installer, probed by `brew` on `PATH`.
    #[must_use]
    pub fn homebrew(executor: &'a dyn Executor, fs_ops: &'a dyn FileSystemOps) -> Self {
        Self {
            name: "Homebrew",
            probe: InstallProbe::OnPath("brew"),
            shell: "/bin/bash",
            command_line: format!("/bin/bash -c \"$(curl -fsSL {HOMEBREW_INSTALL_URL})\""),
            executor,
            fs_ops,
        }
    }

    /// The unattended Oh My Zsh installer, probed by its install directory.
    #[must_use]
    pub fn oh_my_zsh(
        install_dir: PathBuf,
        executor: &'a dyn Executor,
        fs_ops: &'a dyn FileSystemOps,
    ) -> Self {
        Self {
            name: "Oh My Zsh",
            probe: InstallProbe::DirExists(install_dir),
            shell: "sh",
            command_line: format!(
                "sh -c \"$(curl -fsSL {OH_MY_ZSH_INSTALL_URL})\" \"\" --unattended"
            ),
            executor,
            fs_ops,
        }
    }
}

impl Applicable for RemoteInstaller<'_> {
    fn description(&self) -> String {
        self.name.to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.executor
            .run_interactive(self.shell, &["-c", &self.command_line])?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for RemoteInstaller<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        let installed = match &self.probe {
            InstallProbe::OnPath(program) => self.executor.which(program),
            InstallProbe::DirExists(dir) => self.fs_ops.exists(dir),
        };
        if installed {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }
}
