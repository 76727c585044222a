//! Flatpak remote resource (Flathub registration).
use anyhow::Result;

use super::{Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// A Flatpak remote that can be checked and registered system-wide.
#[derive(Debug)]
pub struct FlatpakRemoteResource<'a> {
    /// Remote name (e.g. "flathub").
    pub name: String,
    /// Flatpakrepo URL.
    pub url: String,
    executor: &'a dyn Executor,
}

impl<'a> FlatpakRemoteResource<'a> {
    /// Create a new Flatpak remote resource.
    #[must_use]
    pub const fn new(name: String, url: String, executor: &'a dyn Executor) -> Self {
        Self {
            name,
            url,
            executor,
        }
    }
}

impl Resource for FlatpakRemoteResource<'_> {
    fn description(&self) -> String {
        self.name.clone()
    }

    fn current_state(&self) -> Result<ResourceState> {
        let result = self
            .executor
            .run_unchecked("flatpak", &["remotes", "--columns=name"])?;
        if result.success && result.stdout.lines().any(|l| l.trim() == self.name) {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        let result = self.executor.run_unchecked(
            "flatpak",
            &["remote-add", "--if-not-exists", &self.name, &self.url],
        )?;
        if result.success {
            Ok(ResourceChange::Applied)
        } else {
            Ok(ResourceChange::Failed {
                reason: result.stderr.trim().to_string(),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::MockExecutor;

    fn flathub(executor: &dyn Executor) -> FlatpakRemoteResource<'_> {
        FlatpakRemoteResource::new(
            "flathub".to_string(),
            "https://dl.flathub.org/repo/flathub.flatpakrepo".to_string(),
            executor,
        )
    }

    #[test]
    fn correct_when_remote_listed() {
        let executor = MockExecutor::ok("flathub\nfedora\n");
        assert_eq!(
            flathub(&executor).current_state().unwrap(),
            ResourceState::Correct
        );
    }

    #[test]
    fn missing_when_remote_not_listed() {
        let executor = MockExecutor::ok("fedora\n");
        assert_eq!(
            flathub(&executor).current_state().unwrap(),
            ResourceState::Missing
        );
    }

    #[test]
    fn missing_when_listing_fails() {
        let executor = MockExecutor::fail();
        assert_eq!(
            flathub(&executor).current_state().unwrap(),
            ResourceState::Missing
        );
    }

    #[test]
    fn no_substring_false_positive() {
        let executor = MockExecutor::ok("flathub-beta\n");
        assert_eq!(
            flathub(&executor).current_state().unwrap(),
            ResourceState::Missing,
            "flathub-beta must not satisfy a check for flathub"
        );
    }

    #[test]
    fn apply_success() {
        let executor = MockExecutor::ok("");
        assert_eq!(flathub(&executor).apply().unwrap(), ResourceChange::Applied);
    }

    #[test]
    fn apply_failure_reports_reason() {
        let executor = MockExecutor::with_responses(vec![(false, String::new())]);
        let change = flathub(&executor).apply().unwrap();
        assert!(matches!(change, ResourceChange::Failed { .. }));
    }
}
