//! Step outcome records and the [`Log`] trait steps write through.

/// One line of the end-of-run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub name: String,
    pub status: TaskStatus,
    /// Skip reason or error chain.
    pub message: Option<String>,
}

/// Final outcome of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Ok,
    /// Turned off by an `[optional]` toggle.
    NotApplicable,
    /// Ran, found nothing to do.
    Skipped,
    DryRun,
    Failed,
}

impl TaskStatus {
    /// Summary order, also used for the totals line.
    pub const ALL: [Self; 5] = [
        Self::Ok,
        Self::NotApplicable,
        Self::Skipped,
        Self::DryRun,
        Self::Failed,
    ];

    /// Glyph and ANSI color for the summary line.
    #[must_use]
    pub const fn style(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "\x1b[32m"),
            Self::NotApplicable => ("·", "\x1b[2m"),
            Self::Skipped => ("○", "\x1b[33m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }

    /// Word used in the totals line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NotApplicable => "disabled",
            Self::Skipped => "skipped",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        }
    }
}

/// Sink for step output.
///
/// Steps only see `Arc<dyn Log>`, so tests can hand them a recorder.
pub trait Log: Send + Sync {
    /// Section header, one per step.
    fn stage(&self, msg: &str);
    fn info(&self, msg: &str);
    fn success(&self, msg: &str);
    /// Hidden unless `--verbose`.
    fn debug(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
    /// A change that would have been made outside dry-run mode.
    fn dry_run(&self, msg: &str);
    /// Remember a step outcome for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
