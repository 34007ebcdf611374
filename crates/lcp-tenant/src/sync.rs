//! Tenant-scoped lifecycle synchronization
//!
//! Each run resolves the tenant, reads the lifecycle resource as the
//! tenant's admin, patches it in memory and writes it back. The write is the
//! last step: any earlier failure leaves the store untouched.

use crate::context::TenantContext;
use crate::error::{SyncError, SyncStatus};
use crate::store::{ConfigStore, TenantDirectory};
use lcp_patcher::{
    LifecycleConfigPatcher, PatchMode, PatchOutcome, PatcherConfig, API_LIFECYCLE_RESOURCE,
};

/// Runs the lifecycle patcher against a tenant's configuration store
#[derive(Debug)]
pub struct TenantLifecycleSync<D, S> {
    directory: D,
    store: S,
    patcher: LifecycleConfigPatcher,
    resource_name: String,
}

impl<D, S> TenantLifecycleSync<D, S>
where
    D: TenantDirectory,
    S: ConfigStore,
{
    /// Create with the stock patcher and resource name
    pub fn new(directory: D, store: S) -> Self {
        Self {
            directory,
            store,
            patcher: LifecycleConfigPatcher::new(),
            resource_name: API_LIFECYCLE_RESOURCE.to_string(),
        }
    }

    /// Create from loaded configuration
    pub fn with_config(directory: D, store: S, config: &PatcherConfig) -> Self {
        Self {
            directory,
            store,
            patcher: LifecycleConfigPatcher::from_config(config),
            resource_name: config.resource_name.clone(),
        }
    }

    /// Tenant directory
    #[inline]
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Configuration store
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Patcher in use
    #[inline]
    pub fn patcher(&self) -> &LifecycleConfigPatcher {
        &self.patcher
    }

    /// Resource read and written on each run
    #[inline]
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// Bring a tenant's lifecycle to the patched state, replacing any earlier patch
    ///
    /// # Errors
    /// `SyncError::StoreAccess` or `SyncError::Patch`; an unknown tenant is
    /// not an error
    pub fn update_lifecycle_config(&self, domain: &str) -> Result<SyncStatus, SyncError> {
        self.run(domain, PatchMode::Synchronize)
    }

    /// Install the custom executor for a tenant
    ///
    /// # Errors
    /// As [`TenantLifecycleSync::update_lifecycle_config`]
    pub fn add_lifecycle_changes(&self, domain: &str) -> Result<SyncStatus, SyncError> {
        self.run(domain, PatchMode::Apply)
    }

    /// Restore the default executor for a tenant
    ///
    /// # Errors
    /// As [`TenantLifecycleSync::update_lifecycle_config`]
    pub fn revert_lifecycle_changes(&self, domain: &str) -> Result<SyncStatus, SyncError> {
        self.run(domain, PatchMode::Revert)
    }

    /// Run `mode` for one tenant
    ///
    /// # Errors
    /// As [`TenantLifecycleSync::update_lifecycle_config`]
    pub fn run(&self, domain: &str, mode: PatchMode) -> Result<SyncStatus, SyncError> {
        let span = tracing::info_span!("lifecycle_sync", tenant = %domain, mode = %mode);
        let _guard = span.enter();

        match self.try_run(domain, mode) {
            Ok(outcome) => {
                let changed = outcome.changed();
                let hash = outcome.after.short();
                match mode {
                    PatchMode::Synchronize => {
                        tracing::info!(tenant = %domain, changed, %hash, "updated API lifecycle for tenant");
                    }
                    PatchMode::Apply => {
                        tracing::info!(tenant = %domain, changed, %hash, "applied custom executor for tenant");
                    }
                    PatchMode::Revert => {
                        tracing::info!(tenant = %domain, changed, %hash, "reverted custom executor for tenant");
                    }
                }
                Ok(SyncStatus::Updated(outcome))
            }
            Err(err) if err.is_skippable() => {
                tracing::warn!(tenant = %domain, "tenant domain does not exist");
                Ok(SyncStatus::Skipped)
            }
            Err(err) => {
                tracing::error!(tenant = %domain, error = %err, "lifecycle update failed");
                Err(err)
            }
        }
    }

    /// Run `mode` for each tenant in turn; one failure does not stop the rest
    pub fn run_all<I>(
        &self,
        domains: I,
        mode: PatchMode,
    ) -> Vec<(String, Result<SyncStatus, SyncError>)>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        domains
            .into_iter()
            .map(|domain| {
                let domain = domain.as_ref();
                (domain.to_string(), self.run(domain, mode))
            })
            .collect()
    }

    fn try_run(&self, domain: &str, mode: PatchMode) -> Result<PatchOutcome, SyncError> {
        let record = self
            .directory
            .resolve(domain)
            .map_err(|e| SyncError::store_access(domain, e))?
            .ok_or_else(|| SyncError::TenantNotFound(domain.to_string()))?;
        let tenant = TenantContext::as_admin(record);

        let current = self
            .store
            .get(&tenant, &self.resource_name)
            .map_err(|e| SyncError::store_access(domain, e))?;
        let outcome = self
            .patcher
            .patch(mode, &current)
            .map_err(|e| SyncError::patch(domain, e))?;
        self.store
            .put(&tenant, &self.resource_name, &outcome.document)
            .map_err(|e| SyncError::store_access(domain, e))?;

        Ok(outcome)
    }
}
