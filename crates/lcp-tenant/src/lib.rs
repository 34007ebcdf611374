//! LCP Tenant Synchronization
//!
//! Applies the lifecycle patcher per tenant: resolve the tenant, read the
//! `APILifeCycle` resource as its admin, patch, write back.
//!
//! # Architecture
//!
//! ```text
//! domain ─► TenantDirectory ─► TenantContext ─► ConfigStore::get
//!                                                    │
//!                                     LifecycleConfigPatcher::patch
//!                                                    │
//!                                              ConfigStore::put
//! ```
//!
//! Unknown tenants are logged and skipped. Any other failure aborts the run
//! for that tenant before the store is written.
//!
//! # Example
//!
//! ```rust,ignore
//! use lcp_tenant::{FsConfigStore, FsTenantDirectory, TenantLifecycleSync};
//!
//! let sync = TenantLifecycleSync::new(
//!     FsTenantDirectory::new("/srv/lcp"),
//!     FsConfigStore::new("/srv/lcp"),
//! );
//! sync.update_lifecycle_config("example.com")?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod context;
pub mod error;
pub mod fs;
pub mod memory;
pub mod store;
pub mod sync;

pub use context::{TenantContext, TenantId, TenantRecord, DEFAULT_ADMIN_USER};
pub use error::{SyncError, SyncStatus};
pub use fs::{FsConfigStore, FsTenantDirectory, TENANT_MANIFEST};
pub use memory::{InMemoryConfigStore, StaticTenantDirectory, StoredResource};
pub use store::{ConfigStore, StoreAccessError, TenantDirectory};
pub use sync::TenantLifecycleSync;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
