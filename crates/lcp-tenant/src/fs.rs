//! Filesystem-backed directory and store
//!
//! Layout:
//!
//! ```text
//! <root>/
//!   <tenant-domain>/
//!     tenant.toml          (optional: id, admin_user)
//!     APILifeCycle.xml
//! ```
//!
//! A tenant exists iff its directory exists. Writes go to a sibling temp
//! file which is then renamed over the target.

use crate::context::{TenantId, TenantContext, TenantRecord, DEFAULT_ADMIN_USER};
use crate::store::{ConfigStore, StoreAccessError, TenantDirectory};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Per-tenant manifest file name
pub const TENANT_MANIFEST: &str = "tenant.toml";

/// Extension of stored resources
const RESOURCE_EXTENSION: &str = "xml";

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TenantManifest {
    id: i32,
    admin_user: String,
}

impl Default for TenantManifest {
    fn default() -> Self {
        Self {
            id: 0,
            admin_user: DEFAULT_ADMIN_USER.to_string(),
        }
    }
}

/// Domains and resource names become path segments, so anything path-like is rejected
fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && !segment.contains("..")
        && !segment.contains(['/', '\\'])
}

/// Store rooted at a directory
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    root: PathBuf,
}

impl FsConfigStore {
    /// Create store rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of resource `name` for `domain`
    ///
    /// # Errors
    /// `StoreAccessError::InvalidName` if either part is not a plain path segment
    pub fn resource_path(&self, domain: &str, name: &str) -> Result<PathBuf, StoreAccessError> {
        for segment in [domain, name] {
            if !is_path_segment(segment) {
                return Err(StoreAccessError::InvalidName(segment.to_string()));
            }
        }
        Ok(self
            .root
            .join(domain)
            .join(format!("{name}.{RESOURCE_EXTENSION}")))
    }
}

impl ConfigStore for FsConfigStore {
    fn get(&self, tenant: &TenantContext, name: &str) -> Result<String, StoreAccessError> {
        let path = self.resource_path(tenant.domain(), name)?;
        std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreAccessError::not_found(tenant.domain(), name),
            _ => StoreAccessError::io_error(&path, e),
        })
    }

    fn put(
        &self,
        tenant: &TenantContext,
        name: &str,
        content: &str,
    ) -> Result<(), StoreAccessError> {
        let path = self.resource_path(tenant.domain(), name)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreAccessError::io_error(parent, e))?;
        }
        let staging = path.with_file_name(format!("{name}.{RESOURCE_EXTENSION}.tmp"));
        std::fs::write(&staging, content).map_err(|e| StoreAccessError::io_error(&staging, e))?;
        std::fs::rename(&staging, &path).map_err(|e| StoreAccessError::io_error(&path, e))?;
        tracing::debug!(
            tenant = %tenant.domain(),
            user = %tenant.acting_user(),
            path = %path.display(),
            "stored resource"
        );
        Ok(())
    }
}

/// Directory whose subdirectories are tenants
#[derive(Debug, Clone)]
pub struct FsTenantDirectory {
    root: PathBuf,
}

impl FsTenantDirectory {
    /// Create directory rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TenantDirectory for FsTenantDirectory {
    fn resolve(&self, domain: &str) -> Result<Option<TenantRecord>, StoreAccessError> {
        if !is_path_segment(domain) {
            return Ok(None);
        }
        let dir = self.root.join(domain);
        if !dir.is_dir() {
            return Ok(None);
        }

        let manifest_path = dir.join(TENANT_MANIFEST);
        let manifest = match std::fs::read_to_string(&manifest_path) {
            Ok(text) => toml::from_str::<TenantManifest>(&text).map_err(|e| {
                StoreAccessError::Backend(format!(
                    "invalid tenant manifest {}: {e}",
                    manifest_path.display()
                ))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => TenantManifest::default(),
            Err(e) => return Err(StoreAccessError::io_error(&manifest_path, e)),
        };

        Ok(Some(TenantRecord {
            id: TenantId(manifest.id),
            domain: domain.to_string(),
            admin_user: manifest.admin_user,
        }))
    }
}
