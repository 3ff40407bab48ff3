use std::process::{Command, Output, Stdio};

use anyhow::Result;

use crate::error::CommandError;

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Render a command line for log and error messages.
#[must_use]
pub fn render(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Abstraction over external process execution.
///
/// Every call is attempted exactly once; nothing here retries.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run a command with captured output. Fails with
    /// [`CommandError::Failed`] if the command exits non-zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or exits non-zero.
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run a command with captured output, returning non-zero exits as a
    /// result instead of an error. Use this for probes.
    ///
    /// # Errors
    ///
    /// Returns an error only if the command cannot be spawned.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Run a command attached to the terminal (installers, `sudo -v`).
    /// Output is not captured.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or exits non-zero.
    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Check whether a program resolves on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// Production [`Executor`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

fn spawn(mut cmd: Command, program: &str) -> Result<ExecResult, CommandError> {
    cmd.output()
        .map(ExecResult::from)
        .map_err(|source| CommandError::Spawn {
            program: program.to_string(),
            source,
        })
}

fn check(result: ExecResult, program: &str, args: &[&str]) -> Result<ExecResult> {
    if result.success {
        return Ok(result);
    }
    Err(CommandError::Failed {
        command: render(program, args),
        code: result.code.unwrap_or(-1),
        stderr: result.stderr.trim().to_string(),
    }
    .into())
}

impl Executor for SystemExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let result = self.run_unchecked(program, args)?;
        check(result, program, args)
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null());
        Ok(spawn(cmd, program)?)
    }

    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;
        let result = ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: status.success(),
            code: status.code(),
        };
        check(result, program, args)
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
