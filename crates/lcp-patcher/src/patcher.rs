//! Lifecycle executor patcher
//!
//! Swaps the executor class of `Publish` / `Re-Publish` executions for a
//! custom handler and reverts that change. Every call parses the input,
//! patches the tree in memory and serializes the whole document; nothing is
//! produced unless all three steps succeed.

use crate::config::PatcherConfig;
use crate::error::PatchError;
use crate::profile::ExecutorProfile;
use crate::report::{PatchMode, PatchOutcome, PatchReport};
use lcp_document::{ContentHash, LifecycleDocument, DEFAULT_MAX_DOCUMENT_BYTES};

/// Applies and reverts the custom executor on lifecycle documents
///
/// Stateless apart from its profile: one instance can serve every tenant.
#[derive(Debug, Clone)]
pub struct LifecycleConfigPatcher {
    profile: ExecutorProfile,
    max_document_bytes: usize,
}

impl LifecycleConfigPatcher {
    /// Patcher with the stock profile
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_profile(ExecutorProfile::default())
    }

    /// Patcher with a specific profile
    #[inline]
    #[must_use]
    pub fn with_profile(profile: ExecutorProfile) -> Self {
        Self {
            profile,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }

    /// Patcher from loaded configuration
    #[must_use]
    pub fn from_config(config: &PatcherConfig) -> Self {
        Self::with_profile(config.executor.clone())
            .with_max_document_bytes(config.limits.max_document_bytes)
    }

    /// With input size bound
    #[inline]
    #[must_use]
    pub fn with_max_document_bytes(mut self, max: usize) -> Self {
        self.max_document_bytes = max;
        self
    }

    /// Active profile
    #[inline]
    #[must_use]
    pub fn profile(&self) -> &ExecutorProfile {
        &self.profile
    }

    /// Install the custom executor
    ///
    /// Every execution for a patched event gets the custom class, and the
    /// target state's data section gains one `(Publish, custom)` execution.
    /// No check is made for an entry inserted by an earlier apply; use
    /// [`LifecycleConfigPatcher::synchronize`] for a repeatable update.
    ///
    /// # Errors
    /// - `PatchError::MalformedConfig` if `config` is not well-formed XML
    /// - `PatchError::Transform` if the result cannot be serialized
    pub fn apply_custom_executor(&self, config: &str) -> Result<String, PatchError> {
        Ok(self.patch(PatchMode::Apply, config)?.document)
    }

    /// Restore the default executor
    ///
    /// Every execution carrying the custom class is reset to the default
    /// class, and every `Publish` execution in the target state's data
    /// section is removed.
    ///
    /// # Errors
    /// Same as [`LifecycleConfigPatcher::apply_custom_executor`]
    pub fn revert_custom_executor(&self, config: &str) -> Result<String, PatchError> {
        Ok(self.patch(PatchMode::Revert, config)?.document)
    }

    /// Revert then apply; repeated calls converge on the same document
    ///
    /// # Errors
    /// Same as [`LifecycleConfigPatcher::apply_custom_executor`]
    pub fn synchronize(&self, config: &str) -> Result<String, PatchError> {
        Ok(self.patch(PatchMode::Synchronize, config)?.document)
    }

    /// Run `mode` against `config` and report what changed
    ///
    /// # Errors
    /// Same as [`LifecycleConfigPatcher::apply_custom_executor`]
    pub fn patch(&self, mode: PatchMode, config: &str) -> Result<PatchOutcome, PatchError> {
        let mut doc = LifecycleDocument::parse_with_limit(config, self.max_document_bytes)?;
        let before = doc.content_hash()?;

        let report = match mode {
            PatchMode::Apply => self.apply_to(&mut doc),
            PatchMode::Revert => self.revert_on(&mut doc),
            PatchMode::Synchronize => {
                let reverted = self.revert_on(&mut doc);
                reverted.combine(self.apply_to(&mut doc))
            }
        };

        let document = doc.to_xml_string()?;
        let after = ContentHash::compute(document.as_bytes());
        tracing::debug!(
            mode = %mode,
            rewritten = report.classes_rewritten,
            inserted = report.executions_inserted,
            removed = report.executions_removed,
            changed = before != after,
            "patched lifecycle document"
        );

        Ok(PatchOutcome {
            mode,
            document,
            report,
            before,
            after,
        })
    }

    /// Apply in place on an already parsed document
    pub fn apply_to(&self, doc: &mut LifecycleDocument) -> PatchReport {
        let profile = &self.profile;
        let mut report = PatchReport::default();

        doc.for_each_execution_mut(|mut execution| {
            if execution
                .for_event()
                .is_some_and(|event| profile.is_patched_event(event))
            {
                execution.set_class(&profile.custom_class);
                report.classes_rewritten += 1;
            }
        });

        let entry = profile.inserted_entry();
        let matched = doc.for_each_state_data_mut(&profile.target_state, |data| match data {
            Some(mut data) => {
                data.append_execution(&entry);
                report.executions_inserted += 1;
            }
            None => report.states_without_data += 1,
        });
        report.target_states = matched;

        self.warn_on_gaps(&report);
        report
    }

    /// Revert in place on an already parsed document
    pub fn revert_on(&self, doc: &mut LifecycleDocument) -> PatchReport {
        let profile = &self.profile;
        let mut report = PatchReport::default();

        doc.for_each_execution_mut(|mut execution| {
            if execution.class() == Some(profile.custom_class.as_str()) {
                execution.set_class(&profile.default_class);
                report.classes_rewritten += 1;
            }
        });

        let matched = doc.for_each_state_data_mut(&profile.target_state, |data| match data {
            Some(mut data) => {
                report.executions_removed +=
                    data.remove_executions(|e| e.for_event == profile.inserted_event);
            }
            None => report.states_without_data += 1,
        });
        report.target_states = matched;

        self.warn_on_gaps(&report);
        report
    }

    fn warn_on_gaps(&self, report: &PatchReport) {
        if report.target_states == 0 {
            tracing::debug!(state = %self.profile.target_state, "no target state in lifecycle");
        }
        if report.states_without_data > 0 {
            tracing::warn!(
                state = %self.profile.target_state,
                count = report.states_without_data,
                "target state has no data section; skipped"
            );
        }
    }
}

impl Default for LifecycleConfigPatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{CUSTOM_EXECUTOR_CLASS, DEFAULT_EXECUTOR_CLASS};
    use lcp_document::ExecutionEntry;
    use pretty_assertions::assert_eq;

    const SIMPLE: &str = r#"<lifecycle>
  <state id="Created">
    <data>
      <execution forEvent="Publish" class="org.wso2.carbon.apimgt.impl.executors.APIExecutor"/>
      <execution forEvent="Deploy" class="org.wso2.carbon.apimgt.impl.executors.APIExecutor"/>
    </data>
  </state>
  <state id="Published">
    <data>
      <execution forEvent="Re-Publish" class="org.wso2.carbon.apimgt.impl.executors.APIExecutor"/>
    </data>
  </state>
</lifecycle>"#;

    fn entries(xml: &str) -> Vec<ExecutionEntry> {
        LifecycleDocument::parse(xml)
            .unwrap()
            .executions()
            .into_iter()
            .map(|l| l.entry)
            .collect()
    }

    #[test]
    fn apply_rewrites_publish_events_and_inserts() {
        let patcher = LifecycleConfigPatcher::new();
        let out = patcher.apply_custom_executor(SIMPLE).unwrap();

        assert_eq!(
            entries(&out),
            vec![
                ExecutionEntry::new("Publish", CUSTOM_EXECUTOR_CLASS),
                ExecutionEntry::new("Deploy", DEFAULT_EXECUTOR_CLASS),
                ExecutionEntry::new("Re-Publish", CUSTOM_EXECUTOR_CLASS),
                ExecutionEntry::new("Publish", CUSTOM_EXECUTOR_CLASS),
            ]
        );
    }

    #[test]
    fn revert_undoes_apply() {
        let patcher = LifecycleConfigPatcher::new();
        let applied = patcher.apply_custom_executor(SIMPLE).unwrap();
        let reverted = patcher.revert_custom_executor(&applied).unwrap();

        let normalized = LifecycleDocument::parse(SIMPLE).unwrap().to_xml_string().unwrap();
        assert_eq!(reverted, normalized);
    }

    #[test]
    fn patch_reports_counters() {
        let patcher = LifecycleConfigPatcher::new();
        let outcome = patcher.patch(PatchMode::Apply, SIMPLE).unwrap();
        assert_eq!(outcome.mode, PatchMode::Apply);
        assert_eq!(outcome.report.classes_rewritten, 2);
        assert_eq!(outcome.report.executions_inserted, 1);
        assert_eq!(outcome.report.target_states, 1);
        assert!(outcome.changed());
    }

    #[test]
    fn revert_on_pristine_document_is_unchanged() {
        let patcher = LifecycleConfigPatcher::new();
        let outcome = patcher.patch(PatchMode::Revert, SIMPLE).unwrap();
        assert_eq!(outcome.report, PatchReport {
            target_states: 1,
            ..PatchReport::default()
        });
        assert!(!outcome.changed());
    }

    #[test]
    fn synchronize_is_idempotent() {
        let patcher = LifecycleConfigPatcher::new();
        let once = patcher.synchronize(SIMPLE).unwrap();
        let twice = patcher.synchronize(&once).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once, patcher.apply_custom_executor(SIMPLE).unwrap());
    }

    #[test]
    fn malformed_input_is_rejected() {
        let err = LifecycleConfigPatcher::new()
            .apply_custom_executor("<not-xml")
            .unwrap_err();
        assert!(matches!(err, PatchError::MalformedConfig(_)));
    }

    #[test]
    fn oversized_input_is_malformed() {
        let err = LifecycleConfigPatcher::new()
            .with_max_document_bytes(16)
            .revert_custom_executor(SIMPLE)
            .unwrap_err();
        assert!(matches!(err, PatchError::MalformedConfig(_)));
    }

    #[test]
    fn target_state_without_data_is_skipped() {
        let xml = r#"<lifecycle><state id="Published"><transition event="Block"/></state></lifecycle>"#;
        let outcome = LifecycleConfigPatcher::new()
            .patch(PatchMode::Apply, xml)
            .unwrap();
        assert_eq!(outcome.report.states_without_data, 1);
        assert_eq!(outcome.report.executions_inserted, 0);
        assert!(!outcome.changed());
    }

    #[test]
    fn custom_profile_is_honoured() {
        let profile = ExecutorProfile::new()
            .with_custom_class("com.example.Custom")
            .with_default_class(DEFAULT_EXECUTOR_CLASS)
            .with_target_state("Created");
        let patcher = LifecycleConfigPatcher::with_profile(profile);
        let out = patcher.apply_custom_executor(SIMPLE).unwrap();

        let created = LifecycleDocument::parse(&out).unwrap().data_executions("Created");
        assert_eq!(created.len(), 3);
        assert_eq!(created[2], ExecutionEntry::new("Publish", "com.example.Custom"));
    }
}
