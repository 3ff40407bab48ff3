//! Idempotent resource primitives (check + apply pattern).
pub mod dock;
pub mod dotfile;
pub mod git_clone;
pub mod git_config;
pub mod installer;
pub mod package;
pub mod preference;
pub mod shell;

use anyhow::Result;

/// Something a step can describe and make true.
///
/// Preference writes and Dock additions stop here: there is no cheap way
/// to read them back, so they are simply applied. Everything that can be
/// read back also implements [`Resource`].
pub trait Applicable {
    /// Short label for log lines, e.g. `wget (formula)`.
    fn description(&self) -> String;

    /// Make the change. Running it twice must be harmless.
    ///
    /// # Errors
    ///
    /// A command that cannot be spawned or exits non-zero, or a failed
    /// filesystem operation.
    fn apply(&self) -> Result<ResourceChange>;
}

impl<T: Applicable + ?Sized> Applicable for &T {
    fn description(&self) -> String {
        (**self).description()
    }

    fn apply(&self) -> Result<ResourceChange> {
        (**self).apply()
    }
}

/// What a probe found.
///
/// ```
/// use macsetup_cli::resources::ResourceState;
///
/// let state = ResourceState::Incorrect { current: "master".into() };
/// assert!(matches!(state, ResourceState::Incorrect { ref current } if current == "master"));
/// assert_ne!(state, ResourceState::Missing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Not installed, not set, not on disk.
    Missing,
    Correct,
    /// Present with another value.
    Incorrect { current: String },
    /// Cannot be applied at all; the item is skipped with `reason`.
    Invalid { reason: String },
}

/// What an apply did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    Applied,
    /// Found nothing to do once it looked closer.
    AlreadyCorrect,
    Skipped { reason: String },
}

/// An [`Applicable`] with a side-effect-free probe.
pub trait Resource: Applicable {
    /// Read the current state.
    ///
    /// # Errors
    ///
    /// Only when the probe itself cannot run. A probe command that exits
    /// non-zero means [`ResourceState::Missing`].
    fn current_state(&self) -> Result<ResourceState>;

    /// `true` for `Missing` and `Incorrect`.
    ///
    /// # Errors
    ///
    /// Whatever [`Resource::current_state`] returns.
    fn needs_change(&self) -> Result<bool> {
        let state = self.current_state()?;
        Ok(!matches!(
            state,
            ResourceState::Correct | ResourceState::Invalid { .. }
        ))
    }
}
