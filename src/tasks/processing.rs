//! The shared probe-then-apply loop behind every multi-item step.
use anyhow::Result;

use super::context::Context;
use crate::resources::{Applicable, Resource, ResourceChange, ResourceState};

/// How a step ended when it did not fail.
///
/// ```
/// use macsetup_cli::tasks::TaskResult;
///
/// let skipped = TaskResult::Skipped("~/.config/nvim already exists".into());
/// assert!(matches!(skipped, TaskResult::Skipped(reason) if reason.contains("nvim")));
/// ```
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Everything requested was applied or already in place.
    Ok,
    /// Nothing to do, with the reason shown in the summary.
    Skipped(String),
    /// Changes were only reported.
    DryRun,
}

/// Per-item outcome counters.
///
/// Each processed item increments exactly one field, so [`total`](Self::total)
/// equals the number of items seen.
///
/// ```
/// use macsetup_cli::tasks::TaskStats;
///
/// let stats = TaskStats { changed: 2, already_ok: 5, skipped: 0, failed: 1 };
/// assert_eq!(stats.summary(false), "2 changed, 5 already ok, 1 failed");
/// assert_eq!(stats.summary(true), "2 would change, 5 already ok, 1 failed");
/// assert_eq!(stats.total(), 8);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Applied (or would be, in a dry run).
    pub changed: u32,
    pub already_ok: u32,
    /// Invalid, unresolvable, or deliberately left alone.
    pub skipped: u32,
    /// Apply attempted and errored.
    pub failed: u32,
}

impl TaskStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.changed + self.already_ok + self.skipped + self.failed
    }

    /// One-line rendering; zero `skipped`/`failed` counts are omitted.
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let changed = if dry_run { "would change" } else { "changed" };
        let mut parts = vec![
            format!("{} {changed}", self.changed),
            format!("{} already ok", self.already_ok),
        ];
        for (count, label) in [(self.skipped, "skipped"), (self.failed, "failed")] {
            if count > 0 {
                parts.push(format!("{count} {label}"));
            }
        }
        parts.join(", ")
    }

    /// Log `label: <summary>` for one batch inside a larger step.
    pub fn log_batch(&self, ctx: &Context, label: &str) {
        ctx.log
            .info(&format!("{label}: {}", self.summary(ctx.dry_run)));
    }

    /// Log the step total and turn it into the step result.
    #[must_use]
    pub fn finish(self, ctx: &Context) -> TaskResult {
        ctx.log.info(&self.summary(ctx.dry_run));
        if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        }
    }

    fn record(&mut self, change: &ResourceChange) {
        match change {
            ResourceChange::Applied => self.changed += 1,
            ResourceChange::AlreadyCorrect => self.already_ok += 1,
            ResourceChange::Skipped { .. } => self.skipped += 1,
        }
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, rhs: Self) {
        *self = Self {
            changed: self.changed + rhs.changed,
            already_ok: self.already_ok + rhs.already_ok,
            skipped: self.skipped + rhs.skipped,
            failed: self.failed + rhs.failed,
        };
    }
}

/// Which probe outcomes get applied, and what an apply error does.
///
/// ```
/// use macsetup_cli::tasks::ProcessOpts;
///
/// let strict = ProcessOpts::apply_all("write");
/// assert!(strict.fix_incorrect && strict.bail_on_error);
///
/// let lenient = ProcessOpts::install_missing("install");
/// assert!(lenient.fix_missing && !lenient.fix_incorrect && !lenient.bail_on_error);
/// ```
#[derive(Debug)]
pub struct ProcessOpts<'a> {
    /// Used in log lines: "install", "write", "clone".
    pub verb: &'a str,
    pub fix_incorrect: bool,
    pub fix_missing: bool,
    /// `false` counts apply errors in [`TaskStats::failed`] and moves on.
    pub bail_on_error: bool,
}

impl<'a> ProcessOpts<'a> {
    /// Apply `Missing` and `Incorrect`; the first error ends the step.
    #[must_use]
    pub const fn apply_all(verb: &'a str) -> Self {
        Self {
            verb,
            fix_incorrect: true,
            fix_missing: true,
            bail_on_error: true,
        }
    }

    /// Apply `Missing` only and keep going on errors.
    #[must_use]
    pub const fn install_missing(verb: &'a str) -> Self {
        Self {
            verb,
            fix_incorrect: false,
            fix_missing: true,
            bail_on_error: false,
        }
    }

    #[must_use]
    pub const fn no_bail(self) -> Self {
        Self {
            bail_on_error: false,
            ..self
        }
    }

    const fn wants(&self, state: &ResourceState) -> bool {
        match state {
            ResourceState::Missing => self.fix_missing,
            ResourceState::Incorrect { .. } => self.fix_incorrect,
            ResourceState::Correct | ResourceState::Invalid { .. } => false,
        }
    }
}

/// Probe each resource, then apply the ones `opts` asks for.
///
/// # Errors
///
/// A probe that cannot run, or an apply error while `bail_on_error` is set.
pub fn process_resources<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    opts: &ProcessOpts,
) -> Result<TaskStats> {
    resources
        .into_iter()
        .try_fold(TaskStats::new(), |mut stats, resource| -> Result<TaskStats> {
            let state = resource.current_state()?;
            stats += process_single(ctx, &resource, state, opts)?;
            Ok(stats)
        })
}

/// Apply each item once. There is no probe, so nothing counts as already ok.
///
/// # Errors
///
/// An apply error while `bail_on_error` is set.
pub fn process_applicable<A: Applicable>(
    ctx: &Context,
    items: impl IntoIterator<Item = A>,
    opts: &ProcessOpts,
) -> Result<TaskStats> {
    items
        .into_iter()
        .try_fold(TaskStats::new(), |mut stats, item| -> Result<TaskStats> {
            if ctx.dry_run {
                ctx.log
                    .dry_run(&format!("would {}: {}", opts.verb, item.description()));
                stats.changed += 1;
            } else {
                stats += apply_change(ctx, &item, opts)?;
            }
            Ok(stats)
        })
}

fn process_single<R: Resource>(
    ctx: &Context,
    resource: &R,
    state: ResourceState,
    opts: &ProcessOpts,
) -> Result<TaskStats> {
    let desc = resource.description();
    let mut delta = TaskStats::new();

    if !opts.wants(&state) {
        match state {
            ResourceState::Correct => {
                ctx.log.debug(&format!("ok: {desc}"));
                delta.already_ok += 1;
            }
            ResourceState::Invalid { reason } => {
                ctx.log.warn(&format!("skipping {desc}: {reason}"));
                delta.skipped += 1;
            }
            ResourceState::Incorrect { current } => {
                ctx.log
                    .debug(&format!("leaving {desc} as is (currently {current})"));
                delta.skipped += 1;
            }
            ResourceState::Missing => delta.skipped += 1,
        }
        return Ok(delta);
    }

    if ctx.dry_run {
        match state {
            ResourceState::Incorrect { current } => ctx.log.dry_run(&format!(
                "would {} {desc} (currently {current})",
                opts.verb
            )),
            _ => ctx.log.dry_run(&format!("would {}: {desc}", opts.verb)),
        }
        delta.changed += 1;
        return Ok(delta);
    }

    apply_change(ctx, resource, opts)
}

fn apply_change<A: Applicable + ?Sized>(
    ctx: &Context,
    item: &A,
    opts: &ProcessOpts,
) -> Result<TaskStats> {
    let desc = item.description();
    let mut delta = TaskStats::new();
    match item.apply() {
        Ok(change) => {
            match &change {
                ResourceChange::Applied => ctx.log.info(&format!("{}: {desc}", opts.verb)),
                ResourceChange::AlreadyCorrect => ctx.log.debug(&format!("ok: {desc}")),
                ResourceChange::Skipped { reason } => {
                    ctx.log.warn(&format!("skipped {desc}: {reason}"));
                }
            }
            delta.record(&change);
        }
        Err(e) if opts.bail_on_error => {
            return Err(e.context(format!("failed to {} {desc}", opts.verb)));
        }
        Err(e) => {
            ctx.log
                .warn(&format!("failed to {} {desc}: {e:#}", opts.verb));
            delta.failed += 1;
        }
    }
    Ok(delta)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::tasks::test_helpers::make_context;
    use std::cell::Cell;

    /// A configurable mock resource for exercising the processing loop.
    struct MockResource {
        state: ResourceState,
        apply_result: Result<ResourceChange, String>,
        applied: Cell<u32>,
    }

    impl MockResource {
        fn new(state: ResourceState) -> Self {
            Self {
                state,
                apply_result: Ok(ResourceChange::Applied),
                applied: Cell::new(0),
            }
        }

        fn with_apply(mut self, result: Result<ResourceChange, String>) -> Self {
            self.apply_result = result;
            self
        }
    }

    impl Applicable for MockResource {
        fn description(&self) -> String {
            "mock resource".to_string()
        }

        fn apply(&self) -> Result<ResourceChange> {
            self.applied.set(self.applied.get() + 1);
            self.apply_result
                .clone()
                .map_err(|s| anyhow::anyhow!("{s}"))
        }
    }

    impl Resource for MockResource {
        fn current_state(&self) -> Result<ResourceState> {
            Ok(self.state.clone())
        }
    }

    fn lenient() -> ProcessOpts<'static> {
        ProcessOpts::apply_all("install").no_bail()
    }

    #[test]
    fn summary_lists_skipped_and_failed_only_when_present() {
        let stats = TaskStats {
            changed: 1,
            already_ok: 2,
            skipped: 0,
            failed: 0,
        };
        assert_eq!(stats.summary(false), "1 changed, 2 already ok");
        let stats = TaskStats {
            changed: 1,
            already_ok: 2,
            skipped: 3,
            failed: 4,
        };
        assert_eq!(
            stats.summary(false),
            "1 changed, 2 already ok, 3 skipped, 4 failed"
        );
    }

    #[test]
    fn finish_reflects_dry_run() {
        let (mut ctx, _, _) = make_context(Config::default());
        assert!(matches!(TaskStats::new().finish(&ctx), TaskResult::Ok));
        ctx.dry_run = true;
        assert!(matches!(TaskStats::new().finish(&ctx), TaskResult::DryRun));
    }

    #[test]
    fn correct_resource_is_not_applied() {
        let (ctx, _, _) = make_context(Config::default());
        let resource = MockResource::new(ResourceState::Correct);
        let stats = process_single(&ctx, &resource, ResourceState::Correct, &lenient()).unwrap();
        assert_eq!(stats.already_ok, 1);
        assert_eq!(resource.applied.get(), 0);
    }

    #[test]
    fn invalid_resource_is_skipped() {
        let (ctx, _, _) = make_context(Config::default());
        let state = ResourceState::Invalid {
            reason: "source missing".to_string(),
        };
        let resource = MockResource::new(state.clone());
        let stats = process_single(&ctx, &resource, state, &lenient()).unwrap();
        assert_eq!(stats.skipped, 1);
        assert_eq!(resource.applied.get(), 0);
    }

    #[test]
    fn incorrect_is_left_alone_when_only_installing_missing() {
        let (ctx, _, _) = make_context(Config::default());
        let state = ResourceState::Incorrect {
            current: "other".to_string(),
        };
        let resource = MockResource::new(state.clone());
        let stats =
            process_single(&ctx, &resource, state, &ProcessOpts::install_missing("install"))
                .unwrap();
        assert_eq!(stats.skipped, 1);
        assert_eq!(resource.applied.get(), 0);
    }

    #[test]
    fn dry_run_counts_change_without_applying() {
        let (mut ctx, _, _) = make_context(Config::default());
        ctx.dry_run = true;
        let resource = MockResource::new(ResourceState::Missing);
        let stats = process_single(&ctx, &resource, ResourceState::Missing, &lenient()).unwrap();
        assert_eq!(stats.changed, 1);
        assert_eq!(resource.applied.get(), 0);
    }

    #[test]
    fn failure_is_counted_when_not_bailing() {
        let (ctx, _, _) = make_context(Config::default());
        let resource =
            MockResource::new(ResourceState::Missing).with_apply(Err("boom".to_string()));
        let stats = process_single(&ctx, &resource, ResourceState::Missing, &lenient()).unwrap();
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.changed, 0);
    }

    #[test]
    fn failure_propagates_when_bailing() {
        let (ctx, _, _) = make_context(Config::default());
        let resource =
            MockResource::new(ResourceState::Missing).with_apply(Err("boom".to_string()));
        let err = process_single(
            &ctx,
            &resource,
            ResourceState::Missing,
            &ProcessOpts::apply_all("write"),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("boom"));
    }

    #[test]
    fn apply_reporting_already_correct_counts_as_ok() {
        let (ctx, _, _) = make_context(Config::default());
        let resource = MockResource::new(ResourceState::Missing)
            .with_apply(Ok(ResourceChange::AlreadyCorrect));
        let stats = process_single(&ctx, &resource, ResourceState::Missing, &lenient()).unwrap();
        assert_eq!(stats.already_ok, 1);
    }

    #[test]
    fn every_item_lands_in_exactly_one_counter() {
        let (ctx, _, _) = make_context(Config::default());
        let resources = vec![
            MockResource::new(ResourceState::Correct),
            MockResource::new(ResourceState::Missing),
            MockResource::new(ResourceState::Missing).with_apply(Err("boom".to_string())),
            MockResource::new(ResourceState::Invalid {
                reason: "x".to_string(),
            }),
            MockResource::new(ResourceState::Incorrect {
                current: "y".to_string(),
            }),
        ];
        let count = u32::try_from(resources.len()).unwrap();
        let stats = process_resources(&ctx, resources, &lenient()).unwrap();
        assert_eq!(
            stats,
            TaskStats {
                changed: 2,
                already_ok: 1,
                skipped: 1,
                failed: 1,
            }
        );
        assert_eq!(stats.total(), count);
    }

    #[test]
    fn applicable_items_are_applied_once_each() {
        let (ctx, _, _) = make_context(Config::default());
        let items = vec![
            MockResource::new(ResourceState::Correct),
            MockResource::new(ResourceState::Correct),
        ];
        let stats = process_applicable(&ctx, &items, &lenient()).unwrap();
        assert_eq!(stats.changed, 2);
        assert!(items.iter().all(|i| i.applied.get() == 1));
    }

    #[test]
    fn applicable_dry_run_applies_nothing() {
        let (mut ctx, _, _) = make_context(Config::default());
        ctx.dry_run = true;
        let items = vec![MockResource::new(ResourceState::Correct)];
        let stats = process_applicable(&ctx, &items, &lenient()).unwrap();
        assert_eq!(stats.changed, 1);
        assert_eq!(items[0].applied.get(), 0);
    }
}
