//! Patcher configuration (TOML)
//!
//! ```toml
//! resource_name = "APILifeCycle"
//!
//! [executor]
//! custom_class = "org.wso2.carbon.apimgt.micro.gateway.common.api.APIExecutionHandler"
//! default_class = "org.wso2.carbon.apimgt.impl.executors.APIExecutor"
//! patched_events = ["Publish", "Re-Publish"]
//! target_state = "Published"
//! inserted_event = "Publish"
//!
//! [limits]
//! max_document_bytes = 1048576
//! ```
//!
//! Every key is optional.

use crate::error::ConfigError;
use crate::profile::ExecutorProfile;
use lcp_document::DEFAULT_MAX_DOCUMENT_BYTES;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the lifecycle resource in the configuration store
pub const API_LIFECYCLE_RESOURCE: &str = "APILifeCycle";

/// Top-level patcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatcherConfig {
    /// Lifecycle resource to read and write
    pub resource_name: String,
    /// Executor classes and events
    pub executor: ExecutorProfile,
    /// Resource limits
    pub limits: Limits,
}

/// Resource limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum accepted document size in bytes
    pub max_document_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

impl Default for PatcherConfig {
    fn default() -> Self {
        Self {
            resource_name: API_LIFECYCLE_RESOURCE.to_string(),
            executor: ExecutorProfile::default(),
            limits: Limits::default(),
        }
    }
}

impl PatcherConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With executor profile
    #[inline]
    #[must_use]
    pub fn with_executor(mut self, executor: ExecutorProfile) -> Self {
        self.executor = executor;
        self
    }

    /// With resource name
    #[inline]
    #[must_use]
    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = name.into();
        self
    }

    /// Parse and validate from TOML text
    ///
    /// # Errors
    /// - `ConfigError::Invalid` on TOML syntax or shape errors
    /// - `ConfigError::Validation` if the executor profile is unusable
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`PatcherConfig::from_toml_str`]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Validate constraints not expressible in the TOML shape
    ///
    /// # Errors
    /// `ConfigError::Validation` describing the violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resource_name.is_empty() {
            return Err(ConfigError::Validation(
                "resource_name must not be empty".to_string(),
            ));
        }
        if self.limits.max_document_bytes == 0 {
            return Err(ConfigError::Validation(
                "limits.max_document_bytes must be positive".to_string(),
            ));
        }
        self.executor.validate().map_err(ConfigError::Validation)
    }
}
