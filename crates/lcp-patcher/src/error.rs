//! Error types for lifecycle patching
//!
//! Provides error handling for:
//! - Document ingress (malformed or oversized XML)
//! - Document egress (serialization back to text)
//! - Patcher configuration loading

use lcp_document::DocumentError;
use std::path::PathBuf;

/// Errors from a single apply/revert/synchronize call
///
/// Either variant ends the call; no output document is produced.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// Input could not be parsed as a lifecycle document
    #[error("malformed lifecycle configuration: {0}")]
    MalformedConfig(#[source] DocumentError),

    /// Patched document could not be serialized
    #[error("failed to transform lifecycle configuration: {0}")]
    Transform(#[source] DocumentError),
}

impl From<DocumentError> for PatchError {
    fn from(err: DocumentError) -> Self {
        if err.is_ingress() {
            Self::MalformedConfig(err)
        } else {
            Self::Transform(err)
        }
    }
}

/// Errors while loading [`crate::PatcherConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected shape
    #[error("invalid config: {0}")]
    Invalid(#[from] toml::de::Error),

    /// Config parsed but violates a constraint
    #[error("config validation failed: {0}")]
    Validation(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
