//! Desktop configuration resource (gsettings keys).
use anyhow::Result;

use super::{Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// A gsettings key that can be checked and set.
#[derive(Debug)]
pub struct GsettingResource<'a> {
    /// Schema (e.g. "org.gnome.desktop.interface").
    pub schema: String,
    /// Key within the schema.
    pub key: String,
    /// Desired value, in GVariant text form.
    pub value: String,
    executor: &'a dyn Executor,
}

impl<'a> GsettingResource<'a> {
    /// Create a new gsettings resource.
    #[must_use]
    pub const fn new(
        schema: String,
        key: String,
        value: String,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            schema,
            key,
            value,
            executor,
        }
    }
}

impl Resource for GsettingResource<'_> {
    fn description(&self) -> String {
        format!("{} {}", self.schema, self.key)
    }

    fn current_state(&self) -> Result<ResourceState> {
        let result = self
            .executor
            .run_unchecked("gsettings", &["get", &self.schema, &self.key])?;
        if !result.success {
            // Unknown schema/key reads as missing; the set then reports the
            // real diagnostic.
            return Ok(ResourceState::Missing);
        }
        let current = result.stdout.trim().to_string();
        if current == self.value.trim() {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect { current })
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        let result = self
            .executor
            .run_unchecked("gsettings", &["set", &self.schema, &self.key, &self.value])?;
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

    fn mono_font(executor: &dyn Executor) -> GsettingResource<'_> {
        GsettingResource::new(
            "org.gnome.desktop.interface".to_string(),
            "monospace-font-name".to_string(),
            "'JetBrainsMono Nerd Font 11'".to_string(),
            executor,
        )
    }

    #[test]
    fn description_is_schema_and_key() {
        let executor = MockExecutor::ok("");
        assert_eq!(
            mono_font(&executor).description(),
            "org.gnome.desktop.interface monospace-font-name"
        );
    }

    #[test]
    fn correct_when_value_matches() {
        let executor = MockExecutor::ok("'JetBrainsMono Nerd Font 11'\n");
        assert_eq!(
            mono_font(&executor).current_state().unwrap(),
            ResourceState::Correct
        );
    }

    #[test]
    fn incorrect_when_value_differs() {
        let executor = MockExecutor::ok("'Source Code Pro 10'\n");
        let state = mono_font(&executor).current_state().unwrap();
        assert_eq!(
            state,
            ResourceState::Incorrect {
                current: "'Source Code Pro 10'".to_string()
            }
        );
    }

    #[test]
    fn missing_when_get_fails() {
        let executor = MockExecutor::fail();
        assert_eq!(
            mono_font(&executor).current_state().unwrap(),
            ResourceState::Missing
        );
    }

    #[test]
    fn apply_sets_value() {
        let executor = MockExecutor::ok("");
        assert_eq!(
            mono_font(&executor).apply().unwrap(),
            ResourceChange::Applied
        );
    }
}
