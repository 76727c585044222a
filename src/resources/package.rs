//! Package installation resource for dnf and Flatpak.
use std::collections::HashSet;

use anyhow::Result;

use super::{Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// Supported package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// Native Fedora packages (dnf/rpm).
    Dnf,
    /// Flatpak applications.
    Flatpak,
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dnf => write!(f, "dnf"),
            Self::Flatpak => write!(f, "flatpak"),
        }
    }
}

/// A package resource that can be checked and installed.
#[derive(Debug)]
pub struct PackageResource<'a> {
    /// Package name (or Flatpak application ID).
    pub name: String,
    /// Package manager to use.
    pub manager: PackageManager,
    /// Flatpak remote to install from (ignored for dnf).
    remote: &'a str,
    /// Executor for running package manager commands.
    executor: &'a dyn Executor,
}

impl<'a> PackageResource<'a> {
    /// Create a new dnf package resource.
    #[must_use]
    pub const fn dnf(name: String, executor: &'a dyn Executor) -> Self {
        Self {
            name,
            manager: PackageManager::Dnf,
            remote: "",
            executor,
        }
    }

    /// Create a new Flatpak application resource installing from `remote`.
    #[must_use]
    pub const fn flatpak(name: String, remote: &'a str, executor: &'a dyn Executor) -> Self {
        Self {
            name,
            manager: PackageManager::Flatpak,
            remote,
            executor,
        }
    }

    /// Determine the resource state from a pre-fetched set of installed
    /// package names.
    ///
    /// This avoids running a per-package query when used with
    /// [`installed_packages`].
    #[must_use]
    pub fn state_from_installed(&self, installed: &HashSet<String>) -> ResourceState {
        if installed.contains(&self.name) {
            ResourceState::Correct
        } else {
            ResourceState::Missing
        }
    }
}

/// Query the full set of installed package names for a given manager.
///
/// Runs a **single** command regardless of how many packages need to be
/// checked. If the query command reports failure the set is empty, which
/// makes every package look missing; the subsequent install attempts then
/// surface the real problem item by item instead of aborting the batch.
///
/// # Errors
///
/// Returns an error if the query tool cannot be executed at all.
pub fn installed_packages(
    manager: PackageManager,
    executor: &dyn Executor,
) -> Result<HashSet<String>> {
    let mut set = HashSet::new();
    match manager {
        PackageManager::Dnf => {
            // One name per line; rpm is authoritative for what dnf installed.
            let result = executor.run_unchecked("rpm", &["-qa", "--queryformat", "%{NAME}\\n"])?;
            if result.success {
                for line in result.stdout.lines() {
                    let name = line.trim();
                    if !name.is_empty() {
                        set.insert(name.to_string());
                    }
                }
            }
        }
        PackageManager::Flatpak => {
            let result =
                executor.run_unchecked("flatpak", &["list", "--app", "--columns=application"])?;
            if result.success {
                for line in result.stdout.lines() {
                    let id = line.trim();
                    if !id.is_empty() {
                        set.insert(id.to_string());
                    }
                }
            }
        }
    }
    Ok(set)
}

impl Resource for PackageResource<'_> {
    fn description(&self) -> String {
        // Bare identifier: per-item install lines promise exactly
        // "Installed <id>" / "Failed to install <id>, skipping...".
        self.name.clone()
    }

    fn current_state(&self) -> Result<ResourceState> {
        match self.manager {
            PackageManager::Dnf => {
                let result = self.executor.run_unchecked("rpm", &["-q", &self.name])?;
                if result.success {
                    Ok(ResourceState::Correct)
                } else {
                    Ok(ResourceState::Missing)
                }
            }
            PackageManager::Flatpak => {
                let result = self.executor.run_unchecked("flatpak", &["info", &self.name])?;
                if result.success {
                    Ok(ResourceState::Correct)
                } else {
                    Ok(ResourceState::Missing)
                }
            }
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        let result = match self.manager {
            PackageManager::Dnf => self
                .executor
                .run_unchecked("sudo", &["dnf", "install", "-y", &self.name])?,
            PackageManager::Flatpak => self.executor.run_unchecked(
                "flatpak",
                &[
                    "install",
                    "-y",
                    "--noninteractive",
                    self.remote,
                    &self.name,
                ],
            )?,
        };
        if result.success {
            Ok(ResourceChange::Applied)
        } else {
            // dnf writes most diagnostics to stderr, flatpak to stdout;
            // surface whichever stream has content.
            let detail = if result.stderr.trim().is_empty() {
                result.stdout.trim().to_string()
            } else {
                result.stderr.trim().to_string()
            };
            Ok(ResourceChange::Failed { reason: detail })
        }
    }
}
