//! `defaults write` preference keys.
use anyhow::Result;

use super::{Applicable, ResourceChange};
use crate::exec::Executor;

/// A typed preference value.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefValue {
    Int(i64),
    Bool(bool),
    Float(f64),
    String(String),
}

impl PrefValue {
    /// The `defaults` type flag for this value.
    #[must_use]
    pub const fn type_flag(&self) -> &'static str {
        match self {
            Self::Int(_) => "-int",
            Self::Bool(_) => "-bool",
            Self::Float(_) => "-float",
            Self::String(_) => "-string",
        }
    }
}

impl std::fmt::Display for PrefValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
        }
    }
}

/// One preference key to write.
///
/// There is no probe: `defaults write` is idempotent, so every configured key
/// is written once per run.
#[derive(Debug)]
pub struct PreferenceWrite<'a> {
    pub domain: &'static str,
    pub key: &'static str,
    pub value: PrefValue,
    /// Write to the per-host store (`-currentHost`).
    pub current_host: bool,
    executor: &'a dyn Executor,
}

impl<'a> PreferenceWrite<'a> {
    #[must_use]
    pub const fn new(
        domain: &'static str,
        key: &'static str,
        value: PrefValue,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            domain,
            key,
            value,
            current_host: false,
            executor,
        }
    }

    /// Scope the write to the current host.
    #[must_use]
    pub const fn current_host(mut self) -> Self {
        self.current_host = true;
        self
    }
}

impl Applicable for PreferenceWrite<'_> {
    fn description(&self) -> String {
        format!("{} {} = {}", self.domain, self.key, self.value)
    }

    fn apply(&self) -> Result<ResourceChange> {
        let value = self.value.to_string();
        let mut args = Vec::with_capacity(7);
        if self.current_host {
            args.push("-currentHost");
        }
        args.extend([
            "write",
            self.domain,
            self.key,
            self.value.type_flag(),
            value.as_str(),
        ]);
        self.executor.run("defaults", &args)?;
        Ok(ResourceChange::Applied)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::RecordingExecutor;

    #[test]
    fn writes_typed_values() {
        let exec = RecordingExecutor::new();
        PreferenceWrite::new("com.apple.dock", "tilesize", PrefValue::Int(48), &exec)
            .apply()
            .unwrap();
        PreferenceWrite::new("com.apple.dock", "autohide", PrefValue::Bool(false), &exec)
            .apply()
            .unwrap();
        PreferenceWrite::new(
            "NSGlobalDomain",
            "com.apple.trackpad.scaling",
            PrefValue::Float(1.5),
            &exec,
        )
        .apply()
        .unwrap();
        PreferenceWrite::new(
            "com.apple.finder",
            "FXPreferredViewStyle",
            PrefValue::String("Nlsv".to_string()),
            &exec,
        )
        .apply()
        .unwrap();
        assert_eq!(
            exec.calls(),
            vec![
                "defaults write com.apple.dock tilesize -int 48",
                "defaults write com.apple.dock autohide -bool false",
                "defaults write NSGlobalDomain com.apple.trackpad.scaling -float 1.5",
                "defaults write com.apple.finder FXPreferredViewStyle -string Nlsv",
            ]
        );
    }

    #[test]
    fn current_host_flag_comes_first() {
        let exec = RecordingExecutor::new();
        PreferenceWrite::new(
            "NSGlobalDomain",
            "com.apple.mouse.tapBehavior",
            PrefValue::Int(1),
            &exec,
        )
        .current_host()
        .apply()
        .unwrap();
        assert_eq!(
            exec.calls(),
            vec!["defaults -currentHost write NSGlobalDomain com.apple.mouse.tapBehavior -int 1"]
        );
    }

    #[test]
    fn failed_write_is_an_error() {
        let exec = RecordingExecutor::new().failing("defaults");
        let write = PreferenceWrite::new("com.apple.dock", "autohide", PrefValue::Bool(true), &exec);
        assert_eq!(write.description(), "com.apple.dock autohide = true");
        assert!(write.apply().is_err());
    }
}
