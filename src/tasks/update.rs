use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};

/// Update all installed packages before anything else runs.
///
/// Everything after this step assumes current metadata and a current
/// system, so a failed update aborts the run.
pub struct UpdateSystem;

impl Task for UpdateSystem {
    fn name(&self) -> &str {
        "Update system"
    }

    fn fail_fast(&self) -> bool {
        true
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.is_fedora && ctx.executor.which("dnf")
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if ctx.dry_run {
            ctx.log.dry_run("sudo dnf upgrade --refresh -y");
            return Ok(TaskResult::DryRun);
        }

        ctx.log.info("refreshing metadata and upgrading packages");
        ctx.executor
            .run("sudo", &["dnf", "upgrade", "--refresh", "-y"])
            .context("system update failed")?;
        ctx.log.success("System up to date");
        Ok(TaskResult::Ok)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::MockExecutor;
    use crate::tasks::test_helpers::{empty_config, make_context, make_test_context};
    use std::sync::Arc;

    #[test]
    fn update_is_fail_fast() {
        assert!(UpdateSystem.fail_fast());
    }

    #[test]
    fn should_not_run_without_dnf() {
        let (ctx, _log) = make_test_context();
        assert!(!UpdateSystem.should_run(&ctx));
    }

    #[test]
    fn dry_run_issues_no_commands() {
        let (mut ctx, log) = make_test_context();
        ctx.dry_run = true;
        let result = UpdateSystem.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::DryRun));
        assert_eq!(log.dry_runs().len(), 1);
    }

    #[test]
    fn run_succeeds_when_dnf_succeeds() {
        let executor = Arc::new(MockExecutor::ok(""));
        let (ctx, _log) = make_context(empty_config(), executor);
        let result = UpdateSystem.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Ok));
    }

    #[test]
    fn run_propagates_dnf_failure() {
        let executor = Arc::new(MockExecutor::fail());
        let (ctx, _log) = make_context(empty_config(), executor);
        let err = UpdateSystem.run(&ctx).unwrap_err();
        assert!(err.to_string().contains("system update failed"));
    }
}
