//! System service resource (systemd units).
use anyhow::Result;

use super::{Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// A system-scope systemd unit that can be checked and enabled.
#[derive(Debug)]
pub struct ServiceResource<'a> {
    /// Unit name (e.g. "fstrim.timer").
    pub name: String,
    executor: &'a dyn Executor,
}

impl<'a> ServiceResource<'a> {
    /// Create a new service resource.
    #[must_use]
    pub const fn new(name: String, executor: &'a dyn Executor) -> Self {
        Self { name, executor }
    }
}

impl Resource for ServiceResource<'_> {
    fn description(&self) -> String {
        self.name.clone()
    }

    fn current_state(&self) -> Result<ResourceState> {
        let result = self
            .executor
            .run_unchecked("systemctl", &["is-enabled", &self.name])?;
        if result.success {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        let result = self
            .executor
            .run_unchecked("sudo", &["systemctl", "enable", "--now", &self.name])?;
        if result.success {
            Ok(ResourceChange::Applied)
        } else {
            Ok(ResourceChange::Failed {
                reason: result.stderr.trim().to_string(),
            })
        }
    }
}
