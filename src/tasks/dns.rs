use std::io::Write as _;

use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::config::settings::Dns;

/// Target path of the rendered resolved drop-in.
const RESOLVED_DROPIN: &str = "/etc/systemd/resolved.conf.d/90-fedsetup.conf";

/// Write the systemd-resolved drop-in and restart the resolver.
///
/// A half-applied resolver configuration would leave the machine with broken
/// name resolution, so this step fails fast.
pub struct ConfigureDns;

impl Task for ConfigureDns {
    fn name(&self) -> &str {
        "Configure DNS"
    }

    fn fail_fast(&self) -> bool {
        true
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config
            .settings
            .dns
            .as_ref()
            .is_some_and(|dns| !dns.servers.is_empty())
            && ctx.executor.which("systemctl")
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let Some(dns) = ctx.config.settings.dns.as_ref() else {
            return Ok(TaskResult::Skipped("no dns configuration".to_string()));
        };
        let content = render_resolved_dropin(dns);

        if ctx.dry_run {
            ctx.log.dry_run(&format!("write {RESOLVED_DROPIN}:"));
            for line in content.lines() {
                ctx.log.dry_run(&format!("  {line}"));
            }
            ctx.log.dry_run("systemctl restart systemd-resolved");
            return Ok(TaskResult::DryRun);
        }

        // Stage locally, then install with root ownership in one step.
        let mut staged =
            tempfile::NamedTempFile::new().context("creating staging file for resolved config")?;
        staged
            .write_all(content.as_bytes())
            .context("writing staged resolved config")?;
        staged.flush().context("flushing staged resolved config")?;
        let staged_path = staged.path().display().to_string();

        ctx.executor
            .run(
                "sudo",
                &["install", "-D", "-m", "0644", &staged_path, RESOLVED_DROPIN],
            )
            .context("installing resolved drop-in")?;
        ctx.executor
            .run("sudo", &["systemctl", "restart", "systemd-resolved"])
            .context("restarting systemd-resolved")?;

        ctx.log.success(&format!("Configured {RESOLVED_DROPIN}"));
        Ok(TaskResult::Ok)
    }
}

/// Render the `[Resolve]` drop-in from the DNS settings.
fn render_resolved_dropin(dns: &Dns) -> String {
    let mut out = String::from("[Resolve]\n");
    out.push_str(&format!("DNS={}\n", dns.servers.join(" ")));
    if !dns.fallback.is_empty() {
        out.push_str(&format!("FallbackDNS={}\n", dns.fallback.join(" ")));
    }
    out.push_str(&format!(
        "DNSOverTLS={}\n",
        if dns.dns_over_tls { "yes" } else { "no" }
    ));
    out
}
