use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resource_states};
use crate::config::{manifest, packages};
use crate::resources::package::{PackageManager, PackageResource, installed_packages};

/// Process a list of Flatpak application IDs using batch-checked state.
///
/// Same contract as the dnf batches: one bulk `flatpak list` query, then one
/// fail-soft install attempt per missing application, in order.
fn process_flatpak_batch(ctx: &Context, ids: &[&str]) -> Result<TaskResult> {
    ctx.log.debug(&format!(
        "batch-checking {} applications with a single query",
        ids.len()
    ));
    let installed = installed_packages(PackageManager::Flatpak, ctx.executor.as_ref())?;
    let remote = &ctx.config.settings.flathub.remote;

    let resource_states = ids.iter().map(|id| {
        let resource = PackageResource::flatpak((*id).to_string(), remote, ctx.executor.as_ref());
        let state = resource.state_from_installed(&installed);
        (resource, state)
    });

    process_resource_states(ctx, resource_states, &ProcessOpts::install())
}

/// Install the built-in set of Flatpak applications.
pub struct InstallFlatpakApps;

impl Task for InstallFlatpakApps {
    fn name(&self) -> &str {
        "Install Flatpak applications"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.executor.which("flatpak")
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_flatpak_batch(ctx, packages::FLATPAK_APPS)
    }
}

/// Install Flatpaks listed in the optional `fpk.txt` manifest.
pub struct InstallManifestFlatpaks;

impl Task for InstallManifestFlatpaks {
    fn name(&self) -> &str {
        "Install Flatpaks from fpk.txt"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.executor.which("flatpak")
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let path = ctx.config.fpk_manifest();
        let Some(ids) = manifest::load(&path)? else {
            ctx.log
                .warn(&format!("{} not found, skipping batch", path.display()));
            return Ok(TaskResult::Skipped("fpk.txt not found".to_string()));
        };
        ctx.log
            .debug(&format!("{} applications listed in fpk.txt", ids.len()));
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        process_flatpak_batch(ctx, &refs)
    }
}
