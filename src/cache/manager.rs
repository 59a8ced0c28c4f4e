//! Cache Manager Module
//!
//! Provider traits the identity facade resolves caches through, and the
//! in-memory manager implementing them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore};
use crate::error::Result;
use crate::identity::TenantScope;

// == Provider Traits ==
/// A resolved cache instance.
///
/// Implementations must tolerate concurrent calls; overlapping `put`s to the
/// same key are last-writer-wins.
pub trait CacheHandle<V>: Send + Sync {
    /// Returns the value mapped to `key`, if any.
    fn get(&self, key: &str) -> Option<V>;

    /// Upserts `key -> value`.
    fn put(&self, key: String, value: V) -> Result<()>;

    /// Deletes the mapping for `key`, returning whether one existed.
    fn remove(&self, key: &str) -> bool;
}

/// Looks up named cache instances.
///
/// Resolution needs an active tenant scope; the same names resolve to
/// different instances under different tenants.
pub trait CacheProvider<V>: Send + Sync {
    /// Returns the cache, or None if it has not been provisioned.
    fn resolve_cache(
        &self,
        scope: &TenantScope,
        manager_name: &str,
        cache_name: &str,
    ) -> Option<Arc<dyn CacheHandle<V>>>;
}

// == In-Memory Cache ==
/// One named cache instance: a `CacheStore` behind a mutex.
#[derive(Debug)]
pub struct InMemoryCache<V> {
    name: String,
    store: Mutex<CacheStore<V>>,
}

impl<V: Clone> InMemoryCache<V> {
    pub fn new(name: impl Into<String>, max_entries: usize, default_ttl: Option<u64>) -> Self {
        Self {
            name: name.into(),
            store: Mutex::new(CacheStore::new(max_entries, default_ttl)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops expired entries, returning how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        self.lock().cleanup_expired()
    }

    // A panic mid-operation leaves the store structurally valid, so a
    // poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, CacheStore<V>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone + Send + Sync> CacheHandle<V> for InMemoryCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        self.lock().get(key)
    }

    fn put(&self, key: String, value: V) -> Result<()> {
        self.lock().set(key, value, None)
    }

    fn remove(&self, key: &str) -> bool {
        self.lock().delete(key)
    }
}

// == Cache Id ==
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheId {
    tenant_domain: String,
    manager_name: String,
    cache_name: String,
}

impl CacheId {
    fn new(scope: &TenantScope, manager_name: &str, cache_name: &str) -> Self {
        Self {
            tenant_domain: scope.tenant_domain().to_string(),
            manager_name: manager_name.to_string(),
            cache_name: cache_name.to_string(),
        }
    }
}

// == In-Memory Cache Manager ==
/// Registry of named caches, partitioned by the resolving tenant domain.
#[derive(Debug)]
pub struct InMemoryCacheManager<V> {
    caches: DashMap<CacheId, Arc<InMemoryCache<V>>>,
}

impl<V> Default for InMemoryCacheManager<V> {
    fn default() -> Self {
        Self {
            caches: DashMap::new(),
        }
    }
}

impl<V: Clone + Send + Sync + 'static> InMemoryCacheManager<V> {
    pub fn new() -> Self {
        Self::default()
    }

    // == Provision ==
    /// Creates the named cache for the scope's tenant, or returns the
    /// existing one unchanged.
    pub fn provision(
        &self,
        scope: &TenantScope,
        manager_name: &str,
        cache_name: &str,
        max_entries: usize,
        default_ttl: Option<u64>,
    ) -> Arc<InMemoryCache<V>> {
        let id = CacheId::new(scope, manager_name, cache_name);
        self.caches
            .entry(id)
            .or_insert_with(|| {
                info!(
                    tenant = scope.tenant_domain(),
                    manager = manager_name,
                    cache = cache_name,
                    max_entries,
                    "Provisioning cache"
                );
                Arc::new(InMemoryCache::new(cache_name, max_entries, default_ttl))
            })
            .value()
            .clone()
    }

    /// Returns the named cache for the scope's tenant.
    pub fn cache(
        &self,
        scope: &TenantScope,
        manager_name: &str,
        cache_name: &str,
    ) -> Option<Arc<InMemoryCache<V>>> {
        self.caches
            .get(&CacheId::new(scope, manager_name, cache_name))
            .map(|cache| cache.value().clone())
    }

    // == Destroy ==
    /// Drops the named cache and everything in it.
    ///
    /// Handles already resolved keep working against the detached instance.
    pub fn destroy(&self, scope: &TenantScope, manager_name: &str, cache_name: &str) -> bool {
        let removed = self
            .caches
            .remove(&CacheId::new(scope, manager_name, cache_name))
            .is_some();
        if removed {
            info!(
                tenant = scope.tenant_domain(),
                manager = manager_name,
                cache = cache_name,
                "Destroyed cache"
            );
        }
        removed
    }

    /// Sweeps every cache, returning the total number of expired entries removed.
    pub fn cleanup_expired(&self) -> usize {
        self.caches
            .iter()
            .map(|cache| {
                let removed = cache.cleanup_expired();
                if removed > 0 {
                    debug!(cache = cache.name(), removed, "Removed expired entries");
                }
                removed
            })
            .sum()
    }

    /// Number of provisioned caches across all tenants.
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }
}

impl<V: Clone + Send + Sync + 'static> CacheProvider<V> for InMemoryCacheManager<V> {
    fn resolve_cache(
        &self,
        scope: &TenantScope,
        manager_name: &str,
        cache_name: &str,
    ) -> Option<Arc<dyn CacheHandle<V>>> {
        self.cache(scope, manager_name, cache_name)
            .map(|cache| cache as Arc<dyn CacheHandle<V>>)
    }
}
