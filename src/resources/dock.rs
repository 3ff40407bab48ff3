//! Dock items and application path resolution.
use std::path::PathBuf;

use anyhow::{Result, bail};

use super::{Applicable, ResourceChange};
use crate::exec::Executor;
use crate::operations::FileSystemOps;

/// Install locations for apps whose bundle is not simply
/// `/Applications/<name>.app`, or that are commonly pinned.
pub const KNOWN_APP_PATHS: &[(&str, &str)] = &[
    ("Finder", "/System/Library/CoreServices/Finder.app"),
    ("Apps", "/System/Applications/Apps.app"),
    ("Firefox", "/Applications/Firefox.app"),
    ("Google Chrome", "/Applications/Google Chrome.app"),
    ("Brave Browser", "/Applications/Brave Browser.app"),
    ("PyCharm", "/Applications/PyCharm.app"),
    ("1Password", "/Applications/1Password.app"),
    ("Discord", "/Applications/Discord.app"),
    ("iTerm", "/Applications/iTerm.app"),
    ("iTerm2", "/Applications/iTerm2.app"),
    ("Sublime Text", "/Applications/Sublime Text.app"),
    ("Messages", "/System/Applications/Messages.app"),
    ("System Settings", "/System/Applications/System Settings.app"),
];

/// `(prefix, suffix)` templates tried, in order, after the known paths.
const FALLBACK_TEMPLATES: &[(&str, &str)] = &[
    ("/Applications/", ".app"),
    ("/System/Applications/", ".app"),
    ("/Applications/", ""),
];

/// Resolve an application display name to an existing bundle path.
///
/// The first existing candidate wins. `None` means the app is not installed.
#[must_use]
pub fn resolve_app(name: &str, fs_ops: &dyn FileSystemOps) -> Option<PathBuf> {
    let known = KNOWN_APP_PATHS
        .iter()
        .filter(|(app, _)| *app == name)
        .map(|(_, path)| PathBuf::from(path));
    let templated = FALLBACK_TEMPLATES
        .iter()
        .map(|(prefix, suffix)| PathBuf::from(format!("{prefix}{name}{suffix}")));

    known.chain(templated).find(|path| fs_ops.exists(path))
}

/// One application added to the end of the Dock.
#[derive(Debug)]
pub struct DockItem<'a> {
    pub name: String,
    pub path: PathBuf,
    executor: &'a dyn Executor,
}

impl<'a> DockItem<'a> {
    #[must_use]
    pub fn new(name: impl Into<String>, path: PathBuf, executor: &'a dyn Executor) -> Self {
        Self {
            name: name.into(),
            path,
            executor,
        }
    }
}

impl Applicable for DockItem<'_> {
    fn description(&self) -> String {
        self.name.clone()
    }

    fn apply(&self) -> Result<ResourceChange> {
        let path = self.path.to_string_lossy();
        let result = self
            .executor
            .run_unchecked("dockutil", &["--add", &path, "--no-restart"])?;
        if !result.success {
            bail!("dockutil could not add {}: {}", path, result.stderr.trim());
        }
        Ok(ResourceChange::Applied)
    }
}
