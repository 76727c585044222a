//! Named tasks executed in a fixed order by the install command.
pub mod desktop;
pub mod dns;
pub mod flatpaks;
pub mod fonts;
pub mod packages;
mod processing;
pub mod repos;
pub mod services;
pub mod update;

mod context;

pub use context::Context;
pub use processing::{ProcessOpts, TaskResult, TaskStats, process_resource_states, process_resources};

use anyhow::Result;

use crate::logging::TaskStatus;

/// A named, executable task.
pub trait Task: Send + Sync {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether a failure of this task aborts the whole run.
    ///
    /// Structural steps (system update, repository enablement, fonts, DNS,
    /// services, desktop settings) are prerequisites and fail fast; the
    /// package batches isolate failure per item and never abort the run.
    fn fail_fast(&self) -> bool {
        false
    }

    /// Whether this task should run on the current platform/configuration.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task fails to execute, such as when system
    /// commands fail or configuration is invalid.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The complete set of tasks run by the install command, in execution order.
///
/// The order is load-bearing: repositories must exist before the package
/// batches, and the additional-applications batch depends on RPM Fusion.
#[must_use]
pub fn all_install_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(update::UpdateSystem),
        Box::new(repos::EnableRepositories),
        Box::new(packages::InstallSystemPackages),
        Box::new(packages::InstallRequiredPackages),
        Box::new(packages::InstallManifestPackages),
        Box::new(flatpaks::InstallFlatpakApps),
        Box::new(flatpaks::InstallManifestFlatpaks),
        Box::new(packages::InstallExtraPackages),
        Box::new(fonts::InstallFonts),
        Box::new(dns::ConfigureDns),
        Box::new(services::ConfigureServices),
        Box::new(desktop::ApplyDesktopSettings),
    ]
}

/// Execute a task, recording the result in the logger.
///
/// # Errors
///
/// Returns an error only when a [`Task::fail_fast`] task fails — the caller
/// aborts the run. Failures of fail-soft tasks are recorded and swallowed.
pub fn execute(task: &dyn Task, ctx: &Context) -> Result<()> {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return Ok(());
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
            if task.fail_fast() {
                return Err(e);
            }
        }
    }
    Ok(())
}
