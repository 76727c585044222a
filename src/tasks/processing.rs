//! Generic batch processing loop: check state, apply, collect stats.
//!
//! This is the one reusable behavioral core of the whole tool. Every
//! package/Flatpak batch, the service enablement, and the desktop settings
//! run through it: items are processed strictly in order, each applied at
//! most once, and — for fail-soft batches — a failing item is reported and
//! skipped without aborting the rest of the batch.

use anyhow::Result;

use super::context::Context;
use crate::resources::{Resource, ResourceChange, ResourceState};

/// Result of a single task execution.
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task was skipped (e.g., manifest missing, nothing configured).
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// Counters for batch tasks that process many items.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of items installed or changed.
    pub changed: u32,
    /// Number of items already in the correct state.
    pub already_ok: u32,
    /// Number of items that failed and were skipped.
    pub failed: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string (e.g. "3 installed, 10 already ok, 1 failed").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        if self.failed > 0 {
            format!(
                "{} {verb}, {} already ok, {} failed",
                self.changed, self.already_ok, self.failed
            )
        } else {
            format!("{} {verb}, {} already ok", self.changed, self.already_ok)
        }
    }

    /// Log the summary and return the appropriate [`TaskResult`].
    #[must_use]
    pub fn finish(self, ctx: &Context) -> TaskResult {
        ctx.log.info(&self.summary(ctx.dry_run));
        if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        }
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, other: Self) {
        self.changed += other.changed;
        self.already_ok += other.already_ok;
        self.failed += other.failed;
    }
}

/// Configuration for the batch processing loop.
///
/// `verb`/`done` shape the per-item console lines: `Installed git` on
/// success, `Failed to install git, skipping...` on tolerated failure.
#[derive(Debug)]
pub struct ProcessOpts<'a> {
    /// Infinitive verb for failure/dry-run messages ("install", "enable", "set").
    pub verb: &'a str,
    /// Past-tense verb for success messages ("Installed", "Enabled", "Set").
    pub done: &'a str,
    /// Propagate per-item errors (fail-fast). If `false`, warn and continue
    /// (fail-soft) — the batch-installer isolation guarantee.
    pub bail_on_error: bool,
}

impl<'a> ProcessOpts<'a> {
    /// Fail-soft package installation: tolerate and report per-item failure.
    #[must_use]
    pub const fn install() -> Self {
        Self {
            verb: "install",
            done: "Installed",
            bail_on_error: false,
        }
    }

    /// Fail-fast processing with custom verbs, for structural steps where
    /// every failure must abort the run.
    #[must_use]
    pub const fn strict(verb: &'a str, done: &'a str) -> Self {
        Self {
            verb,
            done,
            bail_on_error: true,
        }
    }
}

/// Process resources by checking each one's current state and applying as needed.
///
/// Items are processed strictly sequentially, in input order, each exactly
/// once — the package database is lock-protected shared state, so there is
/// nothing to gain from concurrency here.
///
/// # Errors
///
/// Returns an error if a resource state check fails, or — only when
/// `opts.bail_on_error` is set — if an apply fails.
pub fn process_resources<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    opts: &ProcessOpts<'_>,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for resource in resources {
        let current = resource.current_state()?;
        stats += process_single(ctx, &resource, current, opts)?;
    }
    Ok(stats.finish(ctx))
}

/// Process resources with pre-computed states.
///
/// For batches that bulk-query installed state once (e.g. `rpm -qa`) and
/// then iterate with cached results.
///
/// # Errors
///
/// Returns an error only when `opts.bail_on_error` is set and an apply fails.
pub fn process_resource_states<R: Resource>(
    ctx: &Context,
    resource_states: impl IntoIterator<Item = (R, ResourceState)>,
    opts: &ProcessOpts<'_>,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for (resource, current) in resource_states {
        stats += process_single(ctx, &resource, current, opts)?;
    }
    Ok(stats.finish(ctx))
}

/// Process a single resource given its current state, returning a stats delta.
fn process_single<R: Resource>(
    ctx: &Context,
    resource: &R,
    resource_state: ResourceState,
    opts: &ProcessOpts<'_>,
) -> Result<TaskStats> {
    let desc = resource.description();
    let mut delta = TaskStats::new();
    match resource_state {
        ResourceState::Correct => {
            ctx.log.debug(&format!("ok: {desc}"));
            delta.already_ok += 1;
        }
        resource_state @ (ResourceState::Missing | ResourceState::Incorrect { .. }) => {
            if ctx.dry_run {
                let msg = if let ResourceState::Incorrect { ref current } = resource_state {
                    format!("would {} {desc} (currently {current})", opts.verb)
                } else {
                    format!("would {}: {desc}", opts.verb)
                };
                ctx.log.dry_run(&msg);
                delta.changed += 1;
                return Ok(delta);
            }
            delta += apply_resource(ctx, resource, opts)?;
        }
    }
    Ok(delta)
}

/// Apply a single resource change, returning a stats delta.
///
/// Under fail-soft opts every failure path collapses into the one warning
/// line and the loop continues; under fail-fast it propagates.
fn apply_resource<R: Resource>(
    ctx: &Context,
    resource: &R,
    opts: &ProcessOpts<'_>,
) -> Result<TaskStats> {
    let desc = resource.description();
    let mut delta = TaskStats::new();
    let change = match resource.apply() {
        Ok(change) => change,
        Err(e) => {
            if opts.bail_on_error {
                return Err(e);
            }
            ctx.log
                .warn(&format!("Failed to {} {desc}, skipping...", opts.verb));
            ctx.log.debug(&format!("{desc}: {e:#}"));
            delta.failed += 1;
            return Ok(delta);
        }
    };

    match change {
        ResourceChange::Applied => {
            ctx.log.success(&format!("{} {desc}", opts.done));
            delta.changed += 1;
        }
        ResourceChange::AlreadyCorrect => {
            delta.already_ok += 1;
        }
        ResourceChange::Failed { reason } => {
            if opts.bail_on_error {
                anyhow::bail!("failed to {} {desc}: {reason}", opts.verb);
            }
            ctx.log
                .warn(&format!("Failed to {} {desc}, skipping...", opts.verb));
            if !reason.is_empty() {
                ctx.log.debug(&format!("{desc}: {reason}"));
            }
            delta.failed += 1;
        }
    }
    Ok(delta)
}
