//! Tenant Scope Module
//!
//! Request-scoped tenant context. A scope is a value passed to whatever needs
//! it rather than ambient thread state, and it is released on drop.

use std::fmt;

use tracing::{debug, span::EnteredSpan};

// == Constants ==
/// Domain of the administrative tenant caches are resolved under.
pub const SUPER_TENANT_DOMAIN: &str = "carbon.super";

/// Id of the administrative tenant.
pub const SUPER_TENANT_ID: i32 = -1234;

// == Tenant Context ==
/// Identity of a tenant: its domain and numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantContext {
    domain: String,
    id: i32,
}

impl TenantContext {
    pub fn new(domain: impl Into<String>, id: i32) -> Self {
        Self {
            domain: domain.into(),
            id,
        }
    }

    /// The administrative super tenant.
    pub fn super_tenant() -> Self {
        Self::new(SUPER_TENANT_DOMAIN, SUPER_TENANT_ID)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn id(&self) -> i32 {
        self.id
    }
}

impl fmt::Display for TenantContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.domain, self.id)
    }
}

// == Tenant Scope ==
/// An entered tenant scope.
///
/// Work done while the scope is alive runs inside a `tenant_scope` tracing
/// span. Dropping the scope exits the span, so every return path of the
/// owning function releases it.
pub struct TenantScope {
    context: TenantContext,
    _span: EnteredSpan,
}

impl TenantScope {
    // == Enter ==
    pub fn enter(context: TenantContext) -> Self {
        let span = tracing::debug_span!(
            "tenant_scope",
            tenant_domain = %context.domain(),
            tenant_id = context.id()
        )
        .entered();
        debug!("Entered tenant scope");
        Self {
            context,
            _span: span,
        }
    }

    pub fn context(&self) -> &TenantContext {
        &self.context
    }

    pub fn tenant_domain(&self) -> &str {
        self.context.domain()
    }

    pub fn tenant_id(&self) -> i32 {
        self.context.id()
    }
}

impl fmt::Debug for TenantScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantScope")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl Drop for TenantScope {
    fn drop(&mut self) {
        debug!("Exiting tenant scope");
    }
}
