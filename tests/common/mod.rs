// Shared helpers for integration tests.
//
// Provides a temporary project root (config file, dotfiles directory and a
// fake home) plus a recording executor so each integration test can drive
// the public API without touching the real system.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use macsetup_cli::cli::GlobalOpts;
use macsetup_cli::commands::CommandSetup;
use macsetup_cli::commands::setup::Prompter;
use macsetup_cli::exec::{ExecResult, Executor};
use macsetup_cli::logging::{Log, Logger};
use macsetup_cli::operations::SystemFileSystemOps;
use macsetup_cli::tasks::Context;

/// An executor that records command lines and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<String>>,
    on_path: Vec<String>,
}

impl RecordingExecutor {
    pub fn with_which(mut self, program: &str) -> Self {
        self.on_path.push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, program: &str, args: &[&str]) -> ExecResult {
        self.calls
            .lock()
            .expect("calls lock")
            .push(macsetup_cli::exec::render(program, args));
        ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        }
    }
}

impl Executor for RecordingExecutor {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        Ok(self.record(program, args))
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        Ok(self.record(program, args))
    }

    fn run_interactive(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        Ok(self.record(program, args))
    }

    fn which(&self, program: &str) -> bool {
        self.on_path.iter().any(|p| p == program)
    }
}

/// A [`Prompter`] that always gives the same answer and counts questions.
#[derive(Debug, Default)]
pub struct FixedPrompter {
    pub answer: bool,
    pub asked: Mutex<u32>,
}

impl Prompter for FixedPrompter {
    fn confirm(&self, _question: &str) -> bool {
        *self.asked.lock().expect("asked lock") += 1;
        self.answer
    }
}

/// An isolated project root and home directory backed by temp dirs.
pub struct IntegrationTestContext {
    /// Project root containing `config.toml` and `dotfiles/`.
    pub root: tempfile::TempDir,
    /// Stand-in for `$HOME`.
    pub home: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a project root holding `config` as its configuration file.
    pub fn new(config: &str) -> Self {
        let root = tempfile::tempdir().expect("create temp root");
        let home = tempfile::tempdir().expect("create temp home");
        std::fs::write(root.path().join("config.toml"), config).expect("write config.toml");
        Self { root, home }
    }

    /// Add `dotfiles/<name>` with `content`.
    pub fn with_dotfile(self, name: &str, content: &str) -> Self {
        let dir = self.root.path().join("dotfiles");
        std::fs::create_dir_all(&dir).expect("create dotfiles dir");
        std::fs::write(dir.join(name), content).expect("write dotfile");
        self
    }

    /// Add `<home>/<name>` with `content`.
    pub fn with_home_file(self, name: &str, content: &str) -> Self {
        std::fs::write(self.home.path().join(name), content).expect("write home file");
        self
    }

    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// Global options pointing at this root.
    pub fn global(&self) -> GlobalOpts {
        GlobalOpts {
            root: Some(self.root.path().to_path_buf()),
            ..GlobalOpts::default()
        }
    }

    /// Run the shared command setup and build a step context around `executor`.
    pub fn context(
        &self,
        dry_run: bool,
        executor: Arc<RecordingExecutor>,
    ) -> (Context, Arc<Logger>) {
        let log = Arc::new(Logger::new());
        let setup = CommandSetup::init(&self.global(), &log).expect("command setup");
        let ctx = Context {
            config: Arc::new(setup.config),
            root: setup.root,
            log: Arc::clone(&log) as Arc<dyn Log>,
            dry_run,
            home: PathBuf::from(self.home.path()),
            login_shell: "/bin/zsh".to_string(),
            executor,
            fs_ops: Arc::new(SystemFileSystemOps),
        };
        (ctx, log)
    }
}
