//! User Store Module
//!
//! Capability traits the identity cache needs from a user store, a
//! configuration-backed implementation, and a registry keyed by domain name.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

// == User Store Error ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserStoreError {
    #[error("tenant id unavailable: {0}")]
    TenantUnavailable(String),

    #[error("domain name unavailable: {0}")]
    DomainUnavailable(String),
}

// == Capability Traits ==
/// A user store that knows which tenant it belongs to.
pub trait TenantAware {
    fn tenant_id(&self) -> Result<i32, UserStoreError>;
}

/// A user store that reports how usernames compare.
pub trait CaseSensitivityAware {
    /// Whether the store itself treats usernames case-sensitively.
    fn is_case_sensitive(&self) -> bool;

    /// Whether cache keys keep username case when the store is case-sensitive.
    fn is_case_sensitive_for_cache_keys(&self) -> bool;
}

/// Handle to one user store.
///
/// Capabilities are exposed through accessors instead of downcasts; a store
/// that lacks one returns None.
pub trait UserStoreManager: Send + Sync {
    /// The store's configured domain name, e.g. `PRIMARY`.
    fn configured_domain_name(&self) -> Result<String, UserStoreError>;

    fn as_tenant_aware(&self) -> Option<&dyn TenantAware> {
        None
    }

    fn as_case_sensitivity_aware(&self) -> Option<&dyn CaseSensitivityAware> {
        None
    }
}

// == Static User Store ==
/// A user store whose properties are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticUserStore {
    domain_name: String,
    tenant_id: i32,
    case_sensitive: bool,
    case_sensitive_cache_keys: bool,
}

impl StaticUserStore {
    /// Creates a case-sensitive store that keeps username case in cache keys.
    pub fn new(domain_name: impl Into<String>, tenant_id: i32) -> Self {
        Self {
            domain_name: domain_name.into(),
            tenant_id,
            case_sensitive: true,
            case_sensitive_cache_keys: true,
        }
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_case_sensitive_cache_keys(mut self, case_sensitive_cache_keys: bool) -> Self {
        self.case_sensitive_cache_keys = case_sensitive_cache_keys;
        self
    }

    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }
}

impl TenantAware for StaticUserStore {
    fn tenant_id(&self) -> Result<i32, UserStoreError> {
        Ok(self.tenant_id)
    }
}

impl CaseSensitivityAware for StaticUserStore {
    fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn is_case_sensitive_for_cache_keys(&self) -> bool {
        self.case_sensitive_cache_keys
    }
}

impl UserStoreManager for StaticUserStore {
    fn configured_domain_name(&self) -> Result<String, UserStoreError> {
        Ok(self.domain_name.clone())
    }

    fn as_tenant_aware(&self) -> Option<&dyn TenantAware> {
        Some(self)
    }

    fn as_case_sensitivity_aware(&self) -> Option<&dyn CaseSensitivityAware> {
        Some(self)
    }
}

// == User Store Registry ==
/// User stores indexed by domain name. Lookups ignore case, matching how
/// user-store domains are compared.
#[derive(Clone, Default)]
pub struct UserStoreRegistry {
    stores: HashMap<String, Arc<dyn UserStoreManager>>,
}

impl UserStoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a store under `domain_name`, replacing any previous one.
    pub fn register(&mut self, domain_name: &str, store: Arc<dyn UserStoreManager>) {
        self.stores.insert(domain_name.to_uppercase(), store);
    }

    pub fn get(&self, domain_name: &str) -> Option<Arc<dyn UserStoreManager>> {
        self.stores.get(&domain_name.to_uppercase()).cloned()
    }

    /// Registered domain names, sorted.
    pub fn domains(&self) -> Vec<String> {
        let mut domains: Vec<String> = self.stores.keys().cloned().collect();
        domains.sort();
        domains
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
