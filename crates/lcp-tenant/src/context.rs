//! Tenant identity passed explicitly through every store call

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Numeric tenant identifier assigned by the tenant directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub i32);

impl Display for TenantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default administrator account of a tenant
pub const DEFAULT_ADMIN_USER: &str = "admin";

/// A tenant as known to the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRecord {
    /// Numeric id
    pub id: TenantId,
    /// Tenant domain, e.g. `example.com`
    pub domain: String,
    /// Administrator account used for configuration access
    pub admin_user: String,
}

impl TenantRecord {
    /// Create a record with the default admin user
    #[must_use]
    pub fn new(id: i32, domain: impl Into<String>) -> Self {
        Self {
            id: TenantId(id),
            domain: domain.into(),
            admin_user: DEFAULT_ADMIN_USER.to_string(),
        }
    }

    /// With admin user
    #[inline]
    #[must_use]
    pub fn with_admin_user(mut self, user: impl Into<String>) -> Self {
        self.admin_user = user.into();
        self
    }
}

/// Scope of one lifecycle operation: the tenant and the acting user
///
/// Every store call receives this value; no tenant is ever held in
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    tenant: TenantRecord,
    acting_user: String,
}

impl TenantContext {
    /// Act as the tenant's administrator
    #[must_use]
    pub fn as_admin(tenant: TenantRecord) -> Self {
        let acting_user = tenant.admin_user.clone();
        Self {
            tenant,
            acting_user,
        }
    }

    /// Tenant record
    #[inline]
    #[must_use]
    pub fn tenant(&self) -> &TenantRecord {
        &self.tenant
    }

    /// Tenant domain
    #[inline]
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.tenant.domain
    }

    /// Tenant id
    #[inline]
    #[must_use]
    pub fn id(&self) -> TenantId {
        self.tenant.id
    }

    /// User the store should attribute reads and writes to
    #[inline]
    #[must_use]
    pub fn acting_user(&self) -> &str {
        &self.acting_user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_context_acts_as_admin() {
        let record = TenantRecord::new(7, "example.com").with_admin_user("ops");
        let ctx = TenantContext::as_admin(record);
        assert_eq!(ctx.domain(), "example.com");
        assert_eq!(ctx.id(), TenantId(7));
        assert_eq!(ctx.acting_user(), "ops");
    }

    #[test]
    fn default_admin_user() {
        assert_eq!(TenantRecord::new(1, "a.com").admin_user, DEFAULT_ADMIN_USER);
    }
}
