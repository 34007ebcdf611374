//! Patch modes and outcome reporting

use lcp_document::ContentHash;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Which transformation to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchMode {
    /// Install the custom executor
    Apply,
    /// Restore the default executor
    Revert,
    /// Revert, then apply
    Synchronize,
}

impl PatchMode {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apply => "apply",
            Self::Revert => "revert",
            Self::Synchronize => "synchronize",
        }
    }
}

impl Display for PatchMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apply" => Ok(Self::Apply),
            "revert" => Ok(Self::Revert),
            "sync" | "synchronize" => Ok(Self::Synchronize),
            other => Err(format!("unknown patch mode: '{other}'")),
        }
    }
}

/// What a patch did to the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchReport {
    /// `execution` elements whose `class` was written
    pub classes_rewritten: usize,
    /// `execution` elements appended to the target state
    pub executions_inserted: usize,
    /// `execution` elements removed from the target state
    pub executions_removed: usize,
    /// States matching the target id
    pub target_states: usize,
    /// Matching states skipped because they have no `data` section
    pub states_without_data: usize,
}

impl PatchReport {
    /// Sum two reports (used when synchronize runs revert then apply)
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            classes_rewritten: self.classes_rewritten + other.classes_rewritten,
            executions_inserted: self.executions_inserted + other.executions_inserted,
            executions_removed: self.executions_removed + other.executions_removed,
            target_states: self.target_states.max(other.target_states),
            states_without_data: self.states_without_data.max(other.states_without_data),
        }
    }
}

/// Patched document plus bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchOutcome {
    /// Mode that produced this outcome
    pub mode: PatchMode,
    /// Serialized result, ready to persist
    #[serde(skip)]
    pub document: String,
    /// Counters
    pub report: PatchReport,
    /// Hash of the input after normalization (parse + serialize)
    pub before: ContentHash,
    /// Hash of `document`
    pub after: ContentHash,
}

impl PatchOutcome {
    /// Whether the patch changed the document beyond formatting
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}
