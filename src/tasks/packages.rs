use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resource_states};
use crate::config::{manifest, packages};
use crate::resources::package::{PackageManager, PackageResource, installed_packages};

/// Process a list of dnf packages using batch-checked installed state.
///
/// Queries the installed set **once** (`rpm -qa`), then walks the list in
/// order. Installation is fail-soft: one unavailable package is reported and
/// skipped, and the batch continues.
pub(super) fn process_dnf_batch(ctx: &Context, names: &[&str]) -> Result<TaskResult> {
    ctx.log.debug(&format!(
        "batch-checking {} packages with a single query",
        names.len()
    ));
    let installed = installed_packages(PackageManager::Dnf, ctx.executor.as_ref())?;

    let resource_states = names.iter().map(|name| {
        let resource = PackageResource::dnf((*name).to_string(), ctx.executor.as_ref());
        let state = resource.state_from_installed(&installed);
        (resource, state)
    });

    process_resource_states(ctx, resource_states, &ProcessOpts::install())
}

/// Install the baseline tooling the rest of the run depends on.
pub struct InstallSystemPackages;

impl Task for InstallSystemPackages {
    fn name(&self) -> &str {
        "Install system packages"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.is_fedora && ctx.executor.which("dnf")
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_dnf_batch(ctx, packages::SYSTEM_PACKAGES)
    }
}

/// Install the everyday CLI package set.
pub struct InstallRequiredPackages;

impl Task for InstallRequiredPackages {
    fn name(&self) -> &str {
        "Install required packages"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.is_fedora && ctx.executor.which("dnf")
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_dnf_batch(ctx, packages::REQUIRED_PACKAGES)
    }
}

/// Install packages listed in the optional `pkg.txt` manifest.
pub struct InstallManifestPackages;

impl Task for InstallManifestPackages {
    fn name(&self) -> &str {
        "Install packages from pkg.txt"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.is_fedora && ctx.executor.which("dnf")
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let path = ctx.config.pkg_manifest();
        let Some(names) = manifest::load(&path)? else {
            ctx.log
                .warn(&format!("{} not found, skipping batch", path.display()));
            return Ok(TaskResult::Skipped("pkg.txt not found".to_string()));
        };
        ctx.log
            .debug(&format!("{} packages listed in pkg.txt", names.len()));
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        process_dnf_batch(ctx, &refs)
    }
}

/// Install the additional applications that depend on RPM Fusion.
pub struct InstallExtraPackages;

impl Task for InstallExtraPackages {
    fn name(&self) -> &str {
        "Install additional applications"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.is_fedora && ctx.executor.which("dnf")
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_dnf_batch(ctx, packages::EXTRA_PACKAGES)
    }
}
