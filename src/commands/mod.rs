//! Top-level subcommand orchestration.
pub mod check;
pub mod install;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::Logger;
use crate::platform::Platform;
use crate::tasks::{self, Context, Task};

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates platform detection and configuration loading so that each
/// command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    pub platform: Platform,
    pub config: Config,
}

impl CommandSetup {
    /// Detect the platform and load all configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be determined or
    /// `setup.toml` fails to parse.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let platform = Platform::detect();
        let root = resolve_root(global)?;

        log.stage("Loading configuration");
        let config = Config::load(&root)?;

        log.info(&format!("platform: {platform}"));
        log.debug(&format!("root: {}", config.root.display()));
        log.debug(&format!("{} fonts configured", config.settings.fonts.len()));
        log.debug(&format!(
            "{} desktop settings configured",
            config.settings.desktop.len()
        ));
        log.debug(&format!(
            "{} services configured",
            config.settings.services.enable.len()
        ));

        if !platform.is_fedora {
            log.warn("this does not look like a Fedora system; most tasks will be skipped");
        }

        Ok(Self { platform, config })
    }
}

/// Resolve the configuration root directory from CLI arguments.
///
/// Defaults to the current directory — `setup.toml`, `pkg.txt`, and
/// `fpk.txt` are all resolved against it.
///
/// # Errors
///
/// Returns an error if an explicitly given root does not exist, or the
/// current directory cannot be determined.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref root) = global.root {
        if !root.is_dir() {
            anyhow::bail!("root directory {} does not exist", root.display());
        }
        return Ok(root.clone());
    }
    Ok(std::env::current_dir()?)
}

/// Build the task execution context for a command.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn build_context(setup: CommandSetup, log: Arc<Logger>, dry_run: bool) -> Result<Context> {
    Context::new(
        Arc::new(setup.config),
        Arc::new(setup.platform),
        log,
        dry_run,
        Arc::new(crate::exec::SystemExecutor),
    )
}

/// Execute every task in order, print the summary, and report failure.
///
/// A fail-fast task failure aborts the loop immediately; the summary is
/// still printed so the aborted run is visible. Fail-soft (batch) tasks
/// never abort and their per-item failures do not affect the exit code.
///
/// # Errors
///
/// Returns an error if a fail-fast task failed or any task recorded a
/// failure.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    for task in tasks {
        if let Err(e) = tasks::execute(task, ctx) {
            log.print_summary();
            return Err(e.context(format!("aborted by failed task '{}'", task.name())));
        }
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} task(s) failed");
    }
    Ok(())
}
