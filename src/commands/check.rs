use std::sync::Arc;

use anyhow::Result;

use crate::cli::{CheckOpts, GlobalOpts};
use crate::config::manifest;
use crate::exec::{Executor as _, SystemExecutor};
use crate::logging::Logger;

use super::CommandSetup;

/// External tools the install tasks shell out to.
const REQUIRED_TOOLS: &[&str] = &["sudo", "dnf", "rpm", "flatpak", "systemctl"];

/// Tools only needed when the corresponding settings sections are non-empty.
const OPTIONAL_TOOLS: &[(&str, &str)] = &[
    ("gsettings", "desktop settings"),
    ("fc-list", "font installation"),
    ("fc-cache", "font installation"),
    ("tar", "font archive extraction"),
    ("unzip", "font archive extraction"),
];

/// Run the check command: validate configuration, parse the manifests, and
/// probe for external tools. Makes no changes.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a required tool is
/// missing on a Fedora system.
pub fn run(global: &GlobalOpts, _opts: &CheckOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let executor = SystemExecutor;

    log.stage("Manifests");
    let mut manifest_entries = 0usize;
    for path in [setup.config.pkg_manifest(), setup.config.fpk_manifest()] {
        match manifest::load(&path)? {
            Some(entries) => {
                log.info(&format!("{}: {} entries", path.display(), entries.len()));
                manifest_entries += entries.len();
            }
            None => log.warn(&format!("{}: not found (batch will be skipped)", path.display())),
        }
    }
    log.debug(&format!("{manifest_entries} manifest entries total"));

    log.stage("Tools");
    let mut missing_required = Vec::new();
    for tool in REQUIRED_TOOLS {
        if executor.which(tool) {
            log.success(&format!("found {tool}"));
        } else {
            log.error(&format!("missing {tool}"));
            missing_required.push(*tool);
        }
    }
    for (tool, needed_for) in OPTIONAL_TOOLS {
        if executor.which(tool) {
            log.success(&format!("found {tool}"));
        } else {
            log.warn(&format!("missing {tool} (needed for {needed_for})"));
        }
    }

    if setup.platform.is_fedora && !missing_required.is_empty() {
        anyhow::bail!("missing required tools: {}", missing_required.join(", "));
    }

    log.info("configuration is valid");
    Ok(())
}
