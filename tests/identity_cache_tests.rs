//! Integration Tests for the Identity Data Cache
//!
//! Drives the facade through the public API against the in-memory provider.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use identity_cache::cache::{CacheHandle, CacheProvider, InMemoryCacheManager};
use identity_cache::identity::{
    CaseSensitivityAware, IdentityDataCache, StaticUserStore, TenantAware, TenantContext,
    TenantScope, UserStoreError, UserStoreManager, IDENTITY_GOVERNANCE_DATA_CACHE,
    IDENTITY_GOVERNANCE_DATA_CACHE_MANAGER,
};
use identity_cache::{IdentityCacheError, IdentityRecord};

// == Helpers ==

fn provisioned_manager() -> Arc<InMemoryCacheManager<IdentityRecord>> {
    let manager: Arc<InMemoryCacheManager<IdentityRecord>> = Arc::new(InMemoryCacheManager::new());
    let scope = TenantScope::enter(TenantContext::super_tenant());
    manager.provision(
        &scope,
        IDENTITY_GOVERNANCE_DATA_CACHE_MANAGER,
        IDENTITY_GOVERNANCE_DATA_CACHE,
        100,
        None,
    );
    manager
}

fn cached_keys_len(manager: &InMemoryCacheManager<IdentityRecord>) -> usize {
    let scope = TenantScope::enter(TenantContext::super_tenant());
    manager
        .cache(&scope, IDENTITY_GOVERNANCE_DATA_CACHE_MANAGER, IDENTITY_GOVERNANCE_DATA_CACHE)
        .map(|cache| cache.len())
        .unwrap_or(0)
}

fn case_insensitive_primary() -> StaticUserStore {
    StaticUserStore::new("PRIMARY", 1).with_case_sensitive(false)
}

/// User store whose tenant lookup can be switched off.
struct FlakyUserStore {
    inner: StaticUserStore,
    tenant_available: AtomicBool,
}

impl FlakyUserStore {
    fn new() -> Self {
        Self {
            inner: case_insensitive_primary(),
            tenant_available: AtomicBool::new(true),
        }
    }

    fn set_tenant_available(&self, available: bool) {
        self.tenant_available.store(available, Ordering::SeqCst);
    }
}

impl TenantAware for FlakyUserStore {
    fn tenant_id(&self) -> Result<i32, UserStoreError> {
        if self.tenant_available.load(Ordering::SeqCst) {
            self.inner.tenant_id()
        } else {
            Err(UserStoreError::TenantUnavailable("realm service offline".to_string()))
        }
    }
}

impl UserStoreManager for FlakyUserStore {
    fn configured_domain_name(&self) -> Result<String, UserStoreError> {
        self.inner.configured_domain_name()
    }

    fn as_tenant_aware(&self) -> Option<&dyn TenantAware> {
        Some(self)
    }

    fn as_case_sensitivity_aware(&self) -> Option<&dyn CaseSensitivityAware> {
        Some(&self.inner)
    }
}

// == Scenarios ==

#[test]
fn test_case_insensitive_store_round_trip() {
    let manager = provisioned_manager();
    let cache = IdentityDataCache::new(manager.clone());
    let store = case_insensitive_primary();
    let record = IdentityRecord::new("Alice").with_claim("email", "a@x.com");

    cache.store(Some(&record), &store).unwrap();

    let loaded = cache.load("alice", &store).unwrap().unwrap();
    assert_eq!(loaded, record);
    assert_eq!(loaded.username, "Alice");

    let scope = TenantScope::enter(TenantContext::super_tenant());
    let raw = manager
        .resolve_cache(&scope, IDENTITY_GOVERNANCE_DATA_CACHE_MANAGER, IDENTITY_GOVERNANCE_DATA_CACHE)
        .unwrap();
    assert!(raw.get("PRIMARY1alice").is_some());
}

#[test]
fn test_load_never_stored_is_absent() {
    let cache = IdentityDataCache::new(provisioned_manager());

    assert_eq!(cache.load("ghost", &case_insensitive_primary()).unwrap(), None);
}

#[test]
fn test_remove_then_load_is_absent() {
    let cache = IdentityDataCache::new(provisioned_manager());
    let store = case_insensitive_primary();
    cache
        .store(Some(&IdentityRecord::new("bob").with_claim("locked", "true")), &store)
        .unwrap();

    cache.remove("BOB", &store).unwrap();

    assert_eq!(cache.load("bob", &store).unwrap(), None);
}

#[test]
fn test_remove_never_stored_is_ok() {
    let cache = IdentityDataCache::new(provisioned_manager());

    assert!(cache.remove("ghost", &case_insensitive_primary()).is_ok());
}

#[test]
fn test_store_absent_record_leaves_cache_unchanged() {
    let cache = IdentityDataCache::new(provisioned_manager());
    let store = case_insensitive_primary();
    let record = IdentityRecord::new("carol").with_claim("verified", "true");
    cache.store(Some(&record), &store).unwrap();

    cache.store(None, &store).unwrap();
    cache.store(Some(&IdentityRecord::new("")), &store).unwrap();

    assert_eq!(cache.load("carol", &store).unwrap(), Some(record));
}

#[test]
fn test_empty_username_operations_are_noops() {
    let manager = provisioned_manager();
    let cache = IdentityDataCache::new(manager.clone());
    let store = case_insensitive_primary();

    assert_eq!(cache.load("", &store).unwrap(), None);
    assert!(cache.remove("", &store).is_ok());
    assert_eq!(cached_keys_len(&manager), 0);
}

#[test]
fn test_domain_qualified_username_shares_key() {
    let cache = IdentityDataCache::new(provisioned_manager());
    let store = case_insensitive_primary();
    let record = IdentityRecord::new("PRIMARY/Dave").with_claim("email", "d@x.com");

    cache.store(Some(&record), &store).unwrap();

    assert_eq!(cache.load("dave", &store).unwrap(), Some(record.clone()));
    assert_eq!(cache.load("PRIMARY/DAVE", &store).unwrap(), Some(record));
}

#[test]
fn test_long_username_round_trip() {
    let cache = IdentityDataCache::new(provisioned_manager());
    let store = StaticUserStore::new("PRIMARY", 1);
    let username = "u".repeat(510);
    let record = IdentityRecord::new(username.clone()).with_claim("email", "u@x.com");

    cache.store(Some(&record), &store).unwrap();

    assert_eq!(cache.load(&username, &store).unwrap(), Some(record));
    cache.remove(&username, &store).unwrap();
    assert_eq!(cache.load(&username, &store).unwrap(), None);
}

#[test]
fn test_strict_case_policy_separates_users() {
    let cache = IdentityDataCache::new(provisioned_manager());
    let store = StaticUserStore::new("PRIMARY", 1);
    cache.store(Some(&IdentityRecord::new("Erin")), &store).unwrap();

    assert!(cache.load("Erin", &store).unwrap().is_some());
    assert!(cache.load("erin", &store).unwrap().is_none());
}

#[test]
fn test_tenant_failure_during_store() {
    let manager = provisioned_manager();
    let cache = IdentityDataCache::new(manager.clone());
    let store = FlakyUserStore::new();
    store.set_tenant_available(false);

    let result = cache.store(Some(&IdentityRecord::new("frank")), &store);

    assert!(matches!(result, Err(IdentityCacheError::StoreAccess(_))));
    assert_eq!(cached_keys_len(&manager), 0);

    // The facade keeps working once the store recovers.
    store.set_tenant_available(true);
    cache.store(Some(&IdentityRecord::new("frank")), &store).unwrap();
    assert!(cache.load("frank", &store).unwrap().is_some());
}

#[test]
fn test_tenant_failure_during_load_and_remove_is_reported() {
    let cache = IdentityDataCache::new(provisioned_manager());
    let store = FlakyUserStore::new();
    cache.store(Some(&IdentityRecord::new("grace")), &store).unwrap();
    store.set_tenant_available(false);

    assert!(matches!(
        cache.load("grace", &store),
        Err(IdentityCacheError::StoreAccess(_))
    ));
    assert!(matches!(
        cache.remove("grace", &store),
        Err(IdentityCacheError::StoreAccess(_))
    ));

    store.set_tenant_available(true);
    assert!(cache.load("grace", &store).unwrap().is_some());
}

#[test]
fn test_cache_recreated_elsewhere_is_picked_up() {
    let manager = provisioned_manager();
    let cache = IdentityDataCache::new(manager.clone());
    let store = case_insensitive_primary();
    cache.store(Some(&IdentityRecord::new("heidi")), &store).unwrap();

    {
        let scope = TenantScope::enter(TenantContext::super_tenant());
        manager.destroy(&scope, IDENTITY_GOVERNANCE_DATA_CACHE_MANAGER, IDENTITY_GOVERNANCE_DATA_CACHE);
    }
    assert_eq!(cache.load("heidi", &store).unwrap(), None);
    cache.store(Some(&IdentityRecord::new("heidi")), &store).unwrap();
    assert_eq!(cached_keys_len(&manager), 0);

    {
        let scope = TenantScope::enter(TenantContext::super_tenant());
        manager.provision(&scope, IDENTITY_GOVERNANCE_DATA_CACHE_MANAGER, IDENTITY_GOVERNANCE_DATA_CACHE, 10, None);
    }
    cache.store(Some(&IdentityRecord::new("heidi")), &store).unwrap();
    assert!(cache.load("heidi", &store).unwrap().is_some());
}

#[test]
fn test_store_overwrites_previous_record() {
    let cache = IdentityDataCache::new(provisioned_manager());
    let store = case_insensitive_primary();
    cache
        .store(Some(&IdentityRecord::new("ivan").with_claim("locked", "false")), &store)
        .unwrap();
    let updated = IdentityRecord::new("Ivan").with_claim("locked", "true");

    cache.store(Some(&updated), &store).unwrap();

    assert_eq!(cache.load("ivan", &store).unwrap(), Some(updated));
}

#[test]
fn test_concurrent_callers_share_facade() {
    let cache = IdentityDataCache::new(provisioned_manager());
    let store = Arc::new(case_insensitive_primary());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let cache = cache.clone();
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let username = format!("user{}", i);
                let record = IdentityRecord::new(username.clone()).with_claim("n", i.to_string());
                cache.store(Some(&record), store.as_ref()).unwrap();
                cache.load(&username, store.as_ref()).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let loaded = handle.join().unwrap().unwrap();
        assert_eq!(loaded.claim("n"), Some(i.to_string().as_str()));
    }
}
