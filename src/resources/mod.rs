//! Idempotent resource primitives (check + apply pattern).
pub mod flatpak_remote;
pub mod gsetting;
pub mod package;
pub mod service;

use anyhow::Result;

/// State of a resource (package, remote, service, settings key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist or is not present.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// The current value of the resource.
        current: String,
    },
}

/// Result of applying a resource change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created or updated.
    Applied,
    /// Resource was already correct (no change needed).
    AlreadyCorrect,
    /// Resource could not be applied; the underlying tool reported failure.
    Failed {
        /// Reason reported by the tool.
        reason: String,
    },
}

/// Unified interface for resources that can be checked and applied.
pub trait Resource {
    /// Human-readable identifier of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined (e.g., the query
    /// tool itself could not be executed).
    fn current_state(&self) -> Result<ResourceState>;

    /// Apply the resource change.
    ///
    /// Implementations report tool-level failure as
    /// [`ResourceChange::Failed`] rather than an `Err`, so the processing
    /// loop decides whether that failure is fatal.
    ///
    /// # Errors
    ///
    /// Returns an error only when the tool cannot be invoked at all.
    fn apply(&self) -> Result<ResourceChange>;

    /// Determine if the resource needs to be changed.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Resource::current_state`].
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(
            self.current_state()?,
            ResourceState::Missing | ResourceState::Incorrect { .. }
        ))
    }
}

impl<R: Resource + ?Sized> Resource for &R {
    fn description(&self) -> String {
        (**self).description()
    }

    fn current_state(&self) -> Result<ResourceState> {
        (**self).current_state()
    }

    fn apply(&self) -> Result<ResourceChange> {
        (**self).apply()
    }
}
