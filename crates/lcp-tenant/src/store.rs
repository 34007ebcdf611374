//! Collaborator traits: tenant directory and configuration store
//!
//! Persistence and tenant management live outside this workspace; these
//! traits are the seam. Implementations must be `Send + Sync` so one
//! instance can be shared by the platform's initialization threads.

use crate::context::{TenantContext, TenantRecord};
use std::path::PathBuf;
use std::sync::Arc;

/// Errors raised by a directory or store backend
#[derive(Debug, thiserror::Error)]
pub enum StoreAccessError {
    /// Resource does not exist for the tenant
    #[error("resource '{name}' not found for tenant {tenant}")]
    NotFound { tenant: String, name: String },

    /// Filesystem failure
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Domain or resource name not usable as a storage key
    #[error("invalid resource or tenant name: '{0}'")]
    InvalidName(String),

    /// Any other backend failure
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreAccessError {
    /// Create not-found error
    pub fn not_found(tenant: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            tenant: tenant.into(),
            name: name.into(),
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Resolves tenant domains
pub trait TenantDirectory: Send + Sync {
    /// Look up a tenant by domain; `Ok(None)` means the tenant does not exist
    ///
    /// # Errors
    /// Backend failures only
    fn resolve(&self, domain: &str) -> Result<Option<TenantRecord>, StoreAccessError>;
}

/// Tenant-scoped named configuration resources
pub trait ConfigStore: Send + Sync {
    /// Fetch resource `name` for the tenant
    ///
    /// # Errors
    /// `StoreAccessError::NotFound` if absent, or a backend failure
    fn get(&self, tenant: &TenantContext, name: &str) -> Result<String, StoreAccessError>;

    /// Replace resource `name` for the tenant
    ///
    /// # Errors
    /// Backend failures
    fn put(&self, tenant: &TenantContext, name: &str, content: &str)
        -> Result<(), StoreAccessError>;
}

impl<T: TenantDirectory + ?Sized> TenantDirectory for &T {
    fn resolve(&self, domain: &str) -> Result<Option<TenantRecord>, StoreAccessError> {
        (**self).resolve(domain)
    }
}

impl<T: TenantDirectory + ?Sized> TenantDirectory for Arc<T> {
    fn resolve(&self, domain: &str) -> Result<Option<TenantRecord>, StoreAccessError> {
        (**self).resolve(domain)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for &T {
    fn get(&self, tenant: &TenantContext, name: &str) -> Result<String, StoreAccessError> {
        (**self).get(tenant, name)
    }

    fn put(
        &self,
        tenant: &TenantContext,
        name: &str,
        content: &str,
    ) -> Result<(), StoreAccessError> {
        (**self).put(tenant, name, content)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for Arc<T> {
    fn get(&self, tenant: &TenantContext, name: &str) -> Result<String, StoreAccessError> {
        (**self).get(tenant, name)
    }

    fn put(
        &self,
        tenant: &TenantContext,
        name: &str,
        content: &str,
    ) -> Result<(), StoreAccessError> {
        (**self).put(tenant, name, content)
    }
}
