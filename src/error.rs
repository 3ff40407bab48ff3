//! Domain-specific error types for the setup engine.
//!
//! Internal modules construct typed errors (e.g. [`ConfigError`],
//! [`CommandError`]) and return them through [`anyhow::Result`]; command
//! handlers at the CLI boundary propagate them with `?`. Tests recover the
//! typed error with [`anyhow::Error::downcast_ref`].
//!
//! # Error hierarchy
//!
//! ```text
//! SetupError
//! ├── Config(ConfigError)  : missing or malformed configuration (fatal)
//! ├── Command(CommandError): external command could not run or exited non-zero
//! └── Step(StepError)      : step failure or operator abort
//! ```
//!
//! A failed *probe* is not an error: probes run through
//! [`Executor::run_unchecked`](crate::exec::Executor::run_unchecked) and a
//! non-zero exit simply means "condition not met".

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the setup engine.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Configuration-related error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// External command error.
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// Step or run level error.
    #[error("Step error: {0}")]
    Step(#[from] StepError),
}

/// Errors that arise while loading the configuration document.
///
/// All variants are fatal: there is no fallback to a default configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("Config file not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("IO error reading config file {}: {source}", path.display())]
    Read {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not a valid document.
    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        /// Path to the malformed file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Errors raised by the command runner in checked mode.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program could not be spawned at all (not found, not executable).
    #[error("failed to execute: {program}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The program ran but exited with a non-zero status.
    #[error("{command} failed (exit {code}): {stderr}")]
    Failed {
        /// Rendered command line.
        command: String,
        /// Exit code, `-1` when terminated by a signal.
        code: i32,
        /// Captured standard error (empty for interactive commands).
        stderr: String,
    },
}

/// Errors that describe step and run outcomes.
#[derive(Error, Debug)]
pub enum StepError {
    /// A step could not complete.
    #[error("Step '{step}' failed: {reason}")]
    Failed {
        /// Name of the step.
        step: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The operator (or the failure policy) stopped the run after a failure.
    #[error("Setup aborted after '{0}' failed")]
    Aborted(String),

    /// One or more steps failed while the run continued.
    #[error("{0} step(s) failed")]
    Incomplete(usize),
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn config_not_found_display() {
        let e = ConfigError::NotFound {
            path: PathBuf::from("/setup/config.toml"),
        };
        assert_eq!(e.to_string(), "Config file not found: /setup/config.toml");
    }

    #[test]
    fn config_read_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Read {
            path: PathBuf::from("/setup/config.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("/setup/config.toml"));
    }

    #[test]
    fn config_parse_display_mentions_path() {
        let source = toml::from_str::<toml::Table>("[dock\n").unwrap_err();
        let e = ConfigError::Parse {
            path: PathBuf::from("config.toml"),
            source,
        };
        assert!(e.to_string().starts_with("Invalid config file config.toml"));
    }

    #[test]
    fn command_failed_display() {
        let e = CommandError::Failed {
            command: "brew install wget".to_string(),
            code: 1,
            stderr: "No available formula".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "brew install wget failed (exit 1): No available formula"
        );
    }

    #[test]
    fn step_aborted_display() {
        let e = StepError::Aborted("Install packages".to_string());
        assert_eq!(e.to_string(), "Setup aborted after 'Install packages' failed");
    }

    #[test]
    fn setup_error_from_config_error() {
        let e: SetupError = ConfigError::NotFound {
            path: PathBuf::from("x"),
        }
        .into();
        assert!(e.to_string().contains("Configuration error"));
    }

    #[test]
    fn setup_error_from_command_error() {
        let e: SetupError = CommandError::Failed {
            command: "killall Dock".to_string(),
            code: 1,
            stderr: String::new(),
        }
        .into();
        assert!(e.to_string().contains("Command error"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<SetupError>();
        assert_send_sync::<ConfigError>();
        assert_send_sync::<CommandError>();
        assert_send_sync::<StepError>();
    }

    #[test]
    fn typed_error_survives_anyhow_round_trip() {
        let err: anyhow::Error = CommandError::Failed {
            command: "defaults write".to_string(),
            code: 2,
            stderr: "bad".to_string(),
        }
        .into();
        assert!(matches!(
            err.downcast_ref::<CommandError>(),
            Some(CommandError::Failed { code: 2, .. })
        ));
    }
}
