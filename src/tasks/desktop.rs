use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::gsetting::GsettingResource;

/// Apply the configured gsettings keys.
pub struct ApplyDesktopSettings;

impl Task for ApplyDesktopSettings {
    fn name(&self) -> &str {
        "Apply desktop settings"
    }

    fn fail_fast(&self) -> bool {
        true
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.settings.desktop.is_empty() && ctx.executor.which("gsettings")
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let resources: Vec<GsettingResource<'_>> = ctx
            .config
            .settings
            .desktop
            .iter()
            .map(|entry| {
                GsettingResource::new(
                    entry.schema.clone(),
                    entry.key.clone(),
                    entry.value.clone(),
                    ctx.executor.as_ref(),
                )
            })
            .collect();

        process_resources(ctx, resources, &ProcessOpts::strict("set", "Set"))
    }
}
