//! Error types for lifecycle document ingress and egress

/// Errors while reading or writing a lifecycle document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Input is not well-formed XML
    #[error("malformed lifecycle document: {0}")]
    Malformed(String),

    /// Input exceeds the configured size bound
    #[error("lifecycle document too large: {size} bytes (max: {max})")]
    TooLarge { size: usize, max: usize },

    /// Serializing the in-memory tree back to text failed
    #[error("failed to serialize lifecycle document: {0}")]
    Transform(String),
}

impl DocumentError {
    /// True when the failure happened on the way in (the input was unusable)
    #[inline]
    #[must_use]
    pub fn is_ingress(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::TooLarge { .. })
    }
}
