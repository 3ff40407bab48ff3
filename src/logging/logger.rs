//! Console logger that also keeps the per-step outcome list.
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::types::{Log, TaskEntry, TaskStatus};

const RESET: &str = "\x1b[0m";

/// Logger handed to every step.
///
/// Output goes through [`tracing`]; the formatter installed by
/// [`init_subscriber`](super::init_subscriber) picks the prefix from the
/// event target. Without a subscriber, output is dropped and the outcome
/// list still works, which is what unit tests rely on.
#[derive(Debug, Default)]
pub struct Logger {
    tasks: Mutex<Vec<TaskEntry>>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<TaskEntry>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Section header.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "macsetup::stage", "{msg}");
    }

    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    pub fn success(&self, msg: &str) {
        tracing::info!(target: "macsetup::success", "{msg}");
    }

    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "macsetup::dry_run", "{msg}");
    }

    pub fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        self.entries().push(TaskEntry {
            name: name.to_string(),
            status,
            message: message.map(str::to_string),
        });
    }

    /// Recorded outcomes in execution order.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.entries().clone()
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.count(TaskStatus::Failed)
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    fn count(&self, status: TaskStatus) -> usize {
        self.entries().iter().filter(|e| e.status == status).count()
    }

    /// One line per recorded step, then the totals. Prints nothing when no
    /// step was recorded.
    pub fn print_summary(&self) {
        let entries = self.task_entries();
        if entries.is_empty() {
            return;
        }

        self.stage("Summary");
        for entry in &entries {
            let (glyph, color) = entry.status.style();
            let detail = entry
                .message
                .as_deref()
                .map(|m| format!(" ({m})"))
                .unwrap_or_default();
            self.info(&format!("{color}{glyph} {}{detail}{RESET}", entry.name));
        }

        let totals: Vec<String> = TaskStatus::ALL
            .iter()
            .map(|&status| {
                let (_, color) = status.style();
                format!("{color}{} {}{RESET}", self.count(status), status.label())
            })
            .collect();
        self.info(&format!("{} steps: {}", entries.len(), totals.join(", ")));
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        Self::stage(self, msg);
    }

    fn info(&self, msg: &str) {
        Self::info(self, msg);
    }

    fn success(&self, msg: &str) {
        Self::success(self, msg);
    }

    fn debug(&self, msg: &str) {
        Self::debug(self, msg);
    }

    fn warn(&self, msg: &str) {
        Self::warn(self, msg);
    }

    fn error(&self, msg: &str) {
        Self::error(self, msg);
    }

    fn dry_run(&self, msg: &str) {
        Self::dry_run(self, msg);
    }

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        Self::record_task(self, name, status, message);
    }
}
