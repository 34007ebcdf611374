//! Executor profile: which classes and events the patcher rewrites

use lcp_document::ExecutionEntry;
use serde::{Deserialize, Serialize};

/// Executor installed by the apply operation
pub const CUSTOM_EXECUTOR_CLASS: &str =
    "org.wso2.carbon.apimgt.micro.gateway.common.api.APIExecutionHandler";
/// Executor restored by the revert operation
pub const DEFAULT_EXECUTOR_CLASS: &str = "org.wso2.carbon.apimgt.impl.executors.APIExecutor";
/// Event that publishes an API
pub const PUBLISH_EVENT: &str = "Publish";
/// Event that re-publishes a blocked or published API
pub const REPUBLISH_EVENT: &str = "Re-Publish";
/// State that receives the extra `Publish` execution
pub const PUBLISHED_STATE: &str = "Published";

/// Classes, events and target state used by the patcher
///
/// Defaults match the stock API lifecycle; every field can be overridden from
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorProfile {
    /// Class written on apply
    pub custom_class: String,
    /// Class written on revert
    pub default_class: String,
    /// Events whose executions are switched to `custom_class` on apply
    pub patched_events: Vec<String>,
    /// Id of the state that receives the inserted execution
    pub target_state: String,
    /// Event of the inserted execution
    pub inserted_event: String,
}

impl ExecutorProfile {
    /// Create default profile
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With custom executor class
    #[inline]
    #[must_use]
    pub fn with_custom_class(mut self, class: impl Into<String>) -> Self {
        self.custom_class = class.into();
        self
    }

    /// With default executor class
    #[inline]
    #[must_use]
    pub fn with_default_class(mut self, class: impl Into<String>) -> Self {
        self.default_class = class.into();
        self
    }

    /// With target state id
    #[inline]
    #[must_use]
    pub fn with_target_state(mut self, state: impl Into<String>) -> Self {
        self.target_state = state.into();
        self
    }

    /// Whether apply rewrites executions for `event`
    #[inline]
    #[must_use]
    pub fn is_patched_event(&self, event: &str) -> bool {
        self.patched_events.iter().any(|e| e == event)
    }

    /// Entry appended to the target state on apply
    #[must_use]
    pub fn inserted_entry(&self) -> ExecutionEntry {
        ExecutionEntry::new(self.inserted_event.clone(), self.custom_class.clone())
    }

    /// Check that the profile can drive a reversible patch
    ///
    /// # Errors
    /// Returns a description of the first violated constraint
    pub fn validate(&self) -> Result<(), String> {
        if self.custom_class.is_empty() || self.default_class.is_empty() {
            return Err("executor classes must not be empty".to_string());
        }
        if self.custom_class == self.default_class {
            return Err(format!(
                "custom and default executor are both '{}'",
                self.custom_class
            ));
        }
        if self.target_state.is_empty() || self.inserted_event.is_empty() {
            return Err("target state and inserted event must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExecutorProfile {
    fn default() -> Self {
        Self {
            custom_class: CUSTOM_EXECUTOR_CLASS.to_string(),
            default_class: DEFAULT_EXECUTOR_CLASS.to_string(),
            patched_events: vec![PUBLISH_EVENT.to_string(), REPUBLISH_EVENT.to_string()],
            target_state: PUBLISHED_STATE.to_string(),
            inserted_event: PUBLISH_EVENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_patches_publish_events() {
        let profile = ExecutorProfile::default();
        assert!(profile.is_patched_event("Publish"));
        assert!(profile.is_patched_event("Re-Publish"));
        assert!(!profile.is_patched_event("Block"));
        assert_eq!(
            profile.inserted_entry(),
            ExecutionEntry::new("Publish", CUSTOM_EXECUTOR_CLASS)
        );
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn identical_classes_are_rejected() {
        let profile = ExecutorProfile::new().with_custom_class(DEFAULT_EXECUTOR_CLASS);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn builder_overrides() {
        let profile = ExecutorProfile::new()
            .with_custom_class("x.Custom")
            .with_default_class("x.Default")
            .with_target_state("Live");
        assert_eq!(profile.custom_class, "x.Custom");
        assert_eq!(profile.default_class, "x.Default");
        assert_eq!(profile.target_state, "Live");
    }
}
