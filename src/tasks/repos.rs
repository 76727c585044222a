use anyhow::{Context as _, Result};

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::flatpak_remote::FlatpakRemoteResource;

/// Register third-party repositories: RPM Fusion, COPR projects, Flathub.
///
/// The package batches depend on these, so this step fails fast.
pub struct EnableRepositories;

impl Task for EnableRepositories {
    fn name(&self) -> &str {
        "Enable repositories"
    }

    fn fail_fast(&self) -> bool {
        true
    }

    fn should_run(&self, ctx: &Context) -> bool {
        let repos = &ctx.config.settings.repos;
        let wants_dnf_repos =
            repos.rpmfusion_free || repos.rpmfusion_nonfree || !repos.copr.is_empty();
        (wants_dnf_repos && ctx.platform.is_fedora && ctx.executor.which("dnf"))
            || ctx.executor.which("flatpak")
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if ctx.platform.is_fedora && ctx.executor.which("dnf") {
            enable_rpmfusion(ctx)?;
            enable_coprs(ctx)?;
        }

        if ctx.executor.which("flatpak") {
            add_flatpak_remote(ctx)?;
        }

        if ctx.dry_run {
            return Ok(TaskResult::DryRun);
        }
        Ok(TaskResult::Ok)
    }
}

/// RPM Fusion repository flavor.
#[derive(Debug, Clone, Copy)]
enum RpmFusion {
    Free,
    Nonfree,
}

impl RpmFusion {
    const fn flavor(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Nonfree => "nonfree",
        }
    }

    /// Repo id as listed by `dnf repolist --enabled`.
    fn repo_id(self) -> String {
        format!("rpmfusion-{}", self.flavor())
    }

    /// Release-package URL for the given Fedora release.
    fn release_url(self, release: u32) -> String {
        let flavor = self.flavor();
        format!(
            "https://mirrors.rpmfusion.org/{flavor}/fedora/rpmfusion-{flavor}-release-{release}.noarch.rpm"
        )
    }
}

/// Install the RPM Fusion release packages that are enabled in settings and
/// not yet registered.
fn enable_rpmfusion(ctx: &Context) -> Result<()> {
    let repos = &ctx.config.settings.repos;
    let mut wanted = Vec::new();
    if repos.rpmfusion_free {
        wanted.push(RpmFusion::Free);
    }
    if repos.rpmfusion_nonfree {
        wanted.push(RpmFusion::Nonfree);
    }
    if wanted.is_empty() {
        return Ok(());
    }

    let enabled = enabled_repo_ids(ctx)?;
    let missing: Vec<RpmFusion> = wanted
        .into_iter()
        .filter(|r| !enabled.iter().any(|id| id.starts_with(&r.repo_id())))
        .collect();
    if missing.is_empty() {
        ctx.log.debug("rpmfusion already enabled");
        return Ok(());
    }

    let release = fedora_release(ctx)?;
    let urls: Vec<String> = missing.iter().map(|r| r.release_url(release)).collect();

    if ctx.dry_run {
        for url in &urls {
            ctx.log.dry_run(&format!("install {url}"));
        }
        return Ok(());
    }

    let mut args = vec!["dnf", "install", "-y"];
    args.extend(urls.iter().map(String::as_str));
    ctx.executor
        .run("sudo", &args)
        .context("enabling rpmfusion repositories")?;
    for repo in &missing {
        ctx.log.success(&format!("Enabled {}", repo.repo_id()));
    }
    Ok(())
}

/// Enable each configured COPR project that is not already active.
fn enable_coprs(ctx: &Context) -> Result<()> {
    let coprs = &ctx.config.settings.repos.copr;
    if coprs.is_empty() {
        return Ok(());
    }
    let enabled = enabled_repo_ids(ctx)?;
    for copr in coprs {
        // dnf names copr repos "copr:copr.fedorainfracloud.org:owner:project"
        let id_suffix = copr.replace('/', ":");
        if enabled.iter().any(|id| id.ends_with(&id_suffix)) {
            ctx.log.debug(&format!("copr {copr} already enabled"));
            continue;
        }
        if ctx.dry_run {
            ctx.log.dry_run(&format!("dnf copr enable -y {copr}"));
            continue;
        }
        ctx.executor
            .run("sudo", &["dnf", "copr", "enable", "-y", copr])
            .with_context(|| format!("enabling copr {copr}"))?;
        ctx.log.success(&format!("Enabled copr {copr}"));
    }
    Ok(())
}

/// Register the Flathub remote (strict: a missing remote would make every
/// Flatpak batch fail item by item later).
fn add_flatpak_remote(ctx: &Context) -> Result<()> {
    let flathub = &ctx.config.settings.flathub;
    let remote = FlatpakRemoteResource::new(
        flathub.remote.clone(),
        flathub.url.clone(),
        ctx.executor.as_ref(),
    );
    process_resources(ctx, [remote], &ProcessOpts::strict("add remote", "Added remote"))?;
    Ok(())
}

/// Repo ids currently enabled, one per line of `dnf repolist`.
fn enabled_repo_ids(ctx: &Context) -> Result<Vec<String>> {
    let result = ctx
        .executor
        .run_unchecked("dnf", &["repolist", "--enabled"])?;
    if !result.success {
        return Ok(Vec::new());
    }
    Ok(result
        .stdout
        .lines()
        .skip(1) // header row
        .filter_map(|line| line.split_whitespace().next())
        .map(String::from)
        .collect())
}

/// Fedora release number, from os-release or `rpm -E %fedora` as fallback.
fn fedora_release(ctx: &Context) -> Result<u32> {
    if let Some(release) = ctx.platform.release {
        return Ok(release);
    }
    let result = ctx
        .executor
        .run("rpm", &["-E", "%fedora"])
        .context("querying fedora release")?;
    result
        .stdout
        .trim()
        .parse::<u32>()
        .context("parsing fedora release number")
}
