//! In-memory directory and store
//!
//! Backed by `DashMap`; each `get`/`put` is atomic per key, nothing more.

use crate::context::{TenantContext, TenantRecord};
use crate::store::{ConfigStore, StoreAccessError, TenantDirectory};
use dashmap::DashMap;

/// Stored resource with a write counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResource {
    /// Current content
    pub content: String,
    /// Number of writes since creation (seeded resources start at 0)
    pub revision: u64,
}

/// Configuration store held in process memory, keyed by `(domain, name)`
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    entries: DashMap<(String, String), StoredResource>,
}

impl InMemoryConfigStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a seeded resource
    #[must_use]
    pub fn with_resource(
        self,
        domain: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.seed(domain, name, content);
        self
    }

    /// Seed a resource without counting it as a write
    pub fn seed(
        &self,
        domain: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) {
        self.entries.insert(
            (domain.into(), name.into()),
            StoredResource {
                content: content.into(),
                revision: 0,
            },
        );
    }

    /// Snapshot of a resource
    #[must_use]
    pub fn resource(&self, domain: &str, name: &str) -> Option<StoredResource> {
        self.entries
            .get(&(domain.to_string(), name.to_string()))
            .map(|entry| entry.value().clone())
    }

    /// Number of stored resources
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn get(&self, tenant: &TenantContext, name: &str) -> Result<String, StoreAccessError> {
        self.resource(tenant.domain(), name)
            .map(|resource| resource.content)
            .ok_or_else(|| StoreAccessError::not_found(tenant.domain(), name))
    }

    fn put(
        &self,
        tenant: &TenantContext,
        name: &str,
        content: &str,
    ) -> Result<(), StoreAccessError> {
        self.entries
            .entry((tenant.domain().to_string(), name.to_string()))
            .and_modify(|resource| {
                resource.content = content.to_string();
                resource.revision += 1;
            })
            .or_insert_with(|| StoredResource {
                content: content.to_string(),
                revision: 1,
            });
        Ok(())
    }
}

/// Tenant directory populated up front
#[derive(Debug, Default)]
pub struct StaticTenantDirectory {
    tenants: DashMap<String, TenantRecord>,
}

impl StaticTenantDirectory {
    /// Create empty directory
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a registered tenant
    #[must_use]
    pub fn with_tenant(self, record: TenantRecord) -> Self {
        self.register(record);
        self
    }

    /// Register or replace a tenant
    pub fn register(&self, record: TenantRecord) {
        self.tenants.insert(record.domain.clone(), record);
    }
}

impl TenantDirectory for StaticTenantDirectory {
    fn resolve(&self, domain: &str) -> Result<Option<TenantRecord>, StoreAccessError> {
        Ok(self.tenants.get(domain).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(domain: &str) -> TenantContext {
        TenantContext::as_admin(TenantRecord::new(1, domain))
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = InMemoryConfigStore::new();
        let err = store.get(&ctx("a.com"), "APILifeCycle").unwrap_err();
        assert!(matches!(err, StoreAccessError::NotFound { .. }));
    }

    #[test]
    fn put_bumps_revision() {
        let store = InMemoryConfigStore::new().with_resource("a.com", "APILifeCycle", "<a/>");
        assert_eq!(store.resource("a.com", "APILifeCycle").unwrap().revision, 0);

        store.put(&ctx("a.com"), "APILifeCycle", "<b/>").unwrap();
        let resource = store.resource("a.com", "APILifeCycle").unwrap();
        assert_eq!(resource.content, "<b/>");
        assert_eq!(resource.revision, 1);
    }

    #[test]
    fn tenants_are_isolated() {
        let store = InMemoryConfigStore::new()
            .with_resource("a.com", "APILifeCycle", "<a/>")
            .with_resource("b.com", "APILifeCycle", "<b/>");
        assert_eq!(store.get(&ctx("a.com"), "APILifeCycle").unwrap(), "<a/>");
        assert_eq!(store.get(&ctx("b.com"), "APILifeCycle").unwrap(), "<b/>");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn static_directory_resolves_registered() {
        let directory = StaticTenantDirectory::new().with_tenant(TenantRecord::new(3, "a.com"));
        assert_eq!(directory.resolve("a.com").unwrap().unwrap().id.0, 3);
        assert!(directory.resolve("b.com").unwrap().is_none());
    }
}
