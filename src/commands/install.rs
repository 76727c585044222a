use std::sync::Arc;

use anyhow::Result;

use crate::cli::{GlobalOpts, InstallOpts};
use crate::logging::Logger;
use crate::tasks::{self, Task};

use super::{CommandSetup, build_context, run_tasks_to_completion};

/// Run the install command.
///
/// # Errors
///
/// Returns an error if configuration loading fails, a fail-fast task fails,
/// or any task records a failure.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, log: &Arc<Logger>) -> Result<()> {
    let version = option_env!("FEDSETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("fedsetup {version}"));

    let setup = CommandSetup::init(global, log)?;
    let ctx = build_context(setup, Arc::clone(log), global.dry_run)?;

    let all_tasks = tasks::all_install_tasks();
    let tasks_to_run: Vec<&dyn Task> = all_tasks
        .iter()
        .filter(|t| selected(t.name(), opts))
        .map(std::convert::AsRef::as_ref)
        .collect();

    run_tasks_to_completion(tasks_to_run, &ctx, log)
}

/// Apply the `--skip` / `--only` filters to a task name.
///
/// `--only` wins when both are given; matching is a case-insensitive
/// substring test against the task name.
fn selected(name: &str, opts: &InstallOpts) -> bool {
    let name = name.to_lowercase();
    if !opts.only.is_empty() {
        return opts.only.iter().any(|o| name.contains(&o.to_lowercase()));
    }
    if !opts.skip.is_empty() {
        return !opts.skip.iter().any(|s| name.contains(&s.to_lowercase()));
    }
    true
}
