//! Identity Data Cache Module
//!
//! Tenant-scoped facade for caching identity records.
//!
//! Caches are resolved under the super tenant no matter whose data is being
//! cached; the owning tenant is part of the key instead. The cache instance
//! is looked up again on every call, so it may be destroyed or recreated
//! elsewhere without this facade holding a stale handle.

use std::sync::Arc;

use tracing::{debug, error};

use crate::cache::{CacheHandle, CacheProvider};
use crate::error::{IdentityCacheError, Result};
use crate::identity::key::{build_key, CacheKey, CaseSensitivityPolicy};
use crate::identity::{TenantContext, TenantScope, UserStoreManager};
use crate::models::IdentityRecord;

// == Constants ==
/// Cache manager the identity governance cache lives in.
pub const IDENTITY_GOVERNANCE_DATA_CACHE_MANAGER: &str = "IDENTITY_GOVERNANCE_DATA_CACHE_MANAGER";

/// Name of the identity governance cache.
pub const IDENTITY_GOVERNANCE_DATA_CACHE: &str = "IDENTITY_GOVERNANCE_DATA_CACHE";

// == Identity Data Cache ==
/// Stores, loads and removes identity records keyed by user store domain,
/// tenant and username.
///
/// Holds no per-call state; share it freely across threads.
#[derive(Clone)]
pub struct IdentityDataCache {
    provider: Arc<dyn CacheProvider<IdentityRecord>>,
    manager_name: String,
    cache_name: String,
}

impl IdentityDataCache {
    // == Constructors ==
    /// Creates a facade over the default identity governance cache.
    pub fn new(provider: Arc<dyn CacheProvider<IdentityRecord>>) -> Self {
        Self::with_names(
            provider,
            IDENTITY_GOVERNANCE_DATA_CACHE_MANAGER,
            IDENTITY_GOVERNANCE_DATA_CACHE,
        )
    }

    /// Creates a facade over a specific cache manager and cache.
    pub fn with_names(
        provider: Arc<dyn CacheProvider<IdentityRecord>>,
        manager_name: impl Into<String>,
        cache_name: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            manager_name: manager_name.into(),
            cache_name: cache_name.into(),
        }
    }

    pub fn manager_name(&self) -> &str {
        &self.manager_name
    }

    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    // == Store ==
    /// Caches `record`, replacing whatever was stored for the same user.
    ///
    /// An absent record, or one without a username, is ignored. So is a
    /// cache that has not been provisioned.
    ///
    /// # Errors
    /// `StoreAccess` when the tenant id or domain cannot be read from the
    /// user store; `Unsupported` when the store lacks a required capability.
    /// Nothing is cached in either case.
    pub fn store(
        &self,
        record: Option<&IdentityRecord>,
        user_store: &dyn UserStoreManager,
    ) -> Result<()> {
        let Some(record) = record.filter(|record| !record.username.is_empty()) else {
            debug!("Skipping store of record without a username");
            return Ok(());
        };

        let scope = Self::enter_scope();
        let key = Self::key_for(&record.username, user_store).inspect_err(Self::log_failure)?;
        let Some(cache) = self.resolve(&scope) else {
            return Ok(());
        };

        debug!(
            key = %key,
            claims = %record.claims_summary(),
            "Storing identity record"
        );
        cache.put(key.into_string(), record.clone())
    }

    // == Load ==
    /// Returns the record cached for `username`, if any.
    ///
    /// An empty username or an unprovisioned cache yields `Ok(None)`.
    ///
    /// # Errors
    /// Same as [`store`](Self::store). A failed lookup is reported as an
    /// error, never as a miss.
    pub fn load(
        &self,
        username: &str,
        user_store: &dyn UserStoreManager,
    ) -> Result<Option<IdentityRecord>> {
        if username.is_empty() {
            return Ok(None);
        }

        let scope = Self::enter_scope();
        let key = Self::key_for(username, user_store).inspect_err(Self::log_failure)?;
        let Some(cache) = self.resolve(&scope) else {
            return Ok(None);
        };

        let record = cache.get(key.as_str());
        match &record {
            Some(record) => debug!(
                key = %key,
                claims = %record.claims_summary(),
                "Loaded identity record"
            ),
            None => debug!(key = %key, "No identity record cached"),
        }
        Ok(record)
    }

    // == Remove ==
    /// Drops the record cached for `username`. Removing an uncached user is
    /// not an error.
    ///
    /// # Errors
    /// Same as [`store`](Self::store).
    pub fn remove(&self, username: &str, user_store: &dyn UserStoreManager) -> Result<()> {
        if username.is_empty() {
            return Ok(());
        }

        let scope = Self::enter_scope();
        let key = Self::key_for(username, user_store).inspect_err(Self::log_failure)?;
        let Some(cache) = self.resolve(&scope) else {
            return Ok(());
        };

        let removed = cache.remove(key.as_str());
        debug!(key = %key, removed, "Removed identity record");
        Ok(())
    }

    // == Helpers ==
    fn enter_scope() -> TenantScope {
        TenantScope::enter(TenantContext::super_tenant())
    }

    /// Reads domain, tenant and case flags from the store and builds the key.
    fn key_for(username: &str, user_store: &dyn UserStoreManager) -> Result<CacheKey> {
        let policy = user_store
            .as_case_sensitivity_aware()
            .map(CaseSensitivityPolicy::from_store)
            .ok_or(IdentityCacheError::Unsupported("case sensitivity aware"))?;
        let tenant_id = user_store
            .as_tenant_aware()
            .ok_or(IdentityCacheError::Unsupported("tenant aware"))?
            .tenant_id()?;
        let domain_name = user_store.configured_domain_name()?;

        build_key(username, &domain_name, tenant_id, policy)
    }

    fn resolve(&self, scope: &TenantScope) -> Option<Arc<dyn CacheHandle<IdentityRecord>>> {
        let cache = self
            .provider
            .resolve_cache(scope, &self.manager_name, &self.cache_name);
        if cache.is_none() {
            debug!(
                manager = %self.manager_name,
                cache = %self.cache_name,
                "Cache not provisioned"
            );
        }
        cache
    }

    fn log_failure(err: &IdentityCacheError) {
        error!(error = %err, "Could not derive identity cache key from user store manager");
    }
}
