use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::service::ServiceResource;

/// Enable and start the configured background services.
///
/// Service management is a structural step: a unit that cannot be enabled
/// points at a broken installation, so failures abort the run.
pub struct ConfigureServices;

impl Task for ConfigureServices {
    fn name(&self) -> &str {
        "Configure services"
    }

    fn fail_fast(&self) -> bool {
        true
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.settings.services.enable.is_empty() && ctx.executor.which("systemctl")
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let resources: Vec<ServiceResource<'_>> = ctx
            .config
            .settings
            .services
            .enable
            .iter()
            .map(|name| ServiceResource::new(name.clone(), ctx.executor.as_ref()))
            .collect();

        process_resources(ctx, resources, &ProcessOpts::strict("enable", "Enabled"))
    }
}
