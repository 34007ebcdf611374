//! Tenant-level errors and results

use crate::store::StoreAccessError;
use lcp_patcher::{PatchError, PatchOutcome};

/// Failure of a tenant-scoped lifecycle operation
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Domain unknown to the tenant directory
    #[error("the provided tenant domain {0} does not exist")]
    TenantNotFound(String),

    /// Directory or store failure
    #[error("configuration store access failed for tenant domain: {tenant}")]
    StoreAccess {
        tenant: String,
        #[source]
        source: StoreAccessError,
    },

    /// Stored lifecycle could not be patched
    #[error("an error occurred while overriding default API execution class of tenant domain: {tenant}")]
    Patch {
        tenant: String,
        #[source]
        source: PatchError,
    },
}

impl SyncError {
    /// Whether the caller may log and continue
    #[inline]
    #[must_use]
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::TenantNotFound(_))
    }

    /// Tenant domain the error refers to
    #[must_use]
    pub fn tenant(&self) -> &str {
        match self {
            Self::TenantNotFound(tenant)
            | Self::StoreAccess { tenant, .. }
            | Self::Patch { tenant, .. } => tenant,
        }
    }

    pub(crate) fn store_access(tenant: &str, source: StoreAccessError) -> Self {
        Self::StoreAccess {
            tenant: tenant.to_string(),
            source,
        }
    }

    pub(crate) fn patch(tenant: &str, source: PatchError) -> Self {
        Self::Patch {
            tenant: tenant.to_string(),
            source,
        }
    }
}

/// Result of a tenant-scoped lifecycle operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// Document patched and written back
    Updated(PatchOutcome),
    /// Tenant unknown; nothing read or written
    Skipped,
}

impl SyncStatus {
    /// Outcome if the store was updated
    #[must_use]
    pub fn outcome(&self) -> Option<&PatchOutcome> {
        match self {
            Self::Updated(outcome) => Some(outcome),
            Self::Skipped => None,
        }
    }

    /// Whether the tenant was skipped
    #[inline]
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}
