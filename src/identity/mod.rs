//! Identity Module
//!
//! Cache key derivation and the tenant-scoped identity record cache.

mod facade;
pub mod key;
mod tenant;
mod user_store;


pub use facade::{
    IdentityDataCache, IDENTITY_GOVERNANCE_DATA_CACHE, IDENTITY_GOVERNANCE_DATA_CACHE_MANAGER,
};
pub use key::{build_key, strip_domain, CacheKey, CaseSensitivityPolicy};
pub use tenant::{TenantContext, TenantScope, SUPER_TENANT_DOMAIN, SUPER_TENANT_ID};
pub use user_store::{
    CaseSensitivityAware, StaticUserStore, TenantAware, UserStoreError, UserStoreManager,
    UserStoreRegistry,
};
