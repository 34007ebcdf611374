//! LCP Lifecycle Patcher
//!
//! Installs a custom executor class on the `Publish` / `Re-Publish`
//! transitions of an API lifecycle document, and reverts that change.
//!
//! # Core Operations
//!
//! - **Apply**: rewrite patched-event executions to the custom class and
//!   append a `Publish` execution to the `Published` state
//! - **Revert**: reset custom-class executions to the default class and drop
//!   every `Publish` execution from the `Published` state
//! - **Synchronize**: revert, then apply; repeated calls converge
//!
//! # Architecture
//!
//! ```text
//! XML text → LifecycleDocument → apply_to / revert_on → LifecycleDocument' → XML text
//!                                       ↑
//!                               ExecutorProfile (PatcherConfig)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use lcp_patcher::LifecycleConfigPatcher;
//!
//! let patcher = LifecycleConfigPatcher::new();
//! let updated = patcher.synchronize(&stored_xml)?;
//! store.put("APILifeCycle", &updated)?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod patcher;
pub mod profile;
pub mod report;

pub use config::{Limits, PatcherConfig, API_LIFECYCLE_RESOURCE};
pub use error::{ConfigError, PatchError};
pub use patcher::LifecycleConfigPatcher;
pub use profile::{
    ExecutorProfile, CUSTOM_EXECUTOR_CLASS, DEFAULT_EXECUTOR_CLASS, PUBLISHED_STATE, PUBLISH_EVENT,
    REPUBLISH_EVENT,
};
pub use report::{PatchMode, PatchOutcome, PatchReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the patcher
    pub use crate::config::PatcherConfig;
    pub use crate::error::PatchError;
    pub use crate::patcher::LifecycleConfigPatcher;
    pub use crate::profile::ExecutorProfile;
    pub use crate::report::{PatchMode, PatchOutcome, PatchReport};
    pub use lcp_document::{ContentHash, ExecutionEntry, LifecycleDocument};
}
