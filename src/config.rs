//! Configuration Module
//!
//! Loads service configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::identity::{
    StaticUserStore, IDENTITY_GOVERNANCE_DATA_CACHE, IDENTITY_GOVERNANCE_DATA_CACHE_MANAGER,
    SUPER_TENANT_ID,
};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of records the identity cache can hold
    pub max_entries: usize,
    /// TTL in seconds for cached records, 0 disables expiry
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Cache manager the identity cache is provisioned in
    pub cache_manager_name: String,
    /// Name of the identity cache
    pub cache_name: String,
    /// Domain name of the user store records are keyed under
    pub user_store_domain: String,
    /// Tenant the user store belongs to
    pub tenant_id: i32,
    /// Whether the user store compares usernames case-sensitively
    pub user_store_case_sensitive: bool,
    /// Whether cache keys keep username case for a case-sensitive store
    pub case_sensitive_cache_keys: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cached records (default: 1000)
    /// - `DEFAULT_TTL` - Record TTL in seconds (default: 900)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 30)
    /// - `CACHE_MANAGER_NAME` - Cache manager name (default: `IDENTITY_GOVERNANCE_DATA_CACHE_MANAGER`)
    /// - `CACHE_NAME` - Cache name (default: `IDENTITY_GOVERNANCE_DATA_CACHE`)
    /// - `USER_STORE_DOMAIN` - User store domain (default: `PRIMARY`)
    /// - `TENANT_ID` - User store tenant id (default: -1234)
    /// - `USER_STORE_CASE_SENSITIVE` - (default: true)
    /// - `CASE_SENSITIVE_CACHE_KEYS` - (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            cache_manager_name: env_or("CACHE_MANAGER_NAME", defaults.cache_manager_name),
            cache_name: env_or("CACHE_NAME", defaults.cache_name),
            user_store_domain: env_or("USER_STORE_DOMAIN", defaults.user_store_domain),
            tenant_id: env_or("TENANT_ID", defaults.tenant_id),
            user_store_case_sensitive: env_or(
                "USER_STORE_CASE_SENSITIVE",
                defaults.user_store_case_sensitive,
            ),
            case_sensitive_cache_keys: env_or(
                "CASE_SENSITIVE_CACHE_KEYS",
                defaults.case_sensitive_cache_keys,
            ),
        }
    }

    /// TTL to provision the cache with; None when expiry is disabled.
    pub fn ttl(&self) -> Option<u64> {
        (self.default_ttl > 0).then_some(self.default_ttl)
    }

    /// The user store described by this configuration.
    pub fn user_store(&self) -> StaticUserStore {
        StaticUserStore::new(self.user_store_domain.clone(), self.tenant_id)
            .with_case_sensitive(self.user_store_case_sensitive)
            .with_case_sensitive_cache_keys(self.case_sensitive_cache_keys)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: 900,
            server_port: 3000,
            cleanup_interval: 30,
            cache_manager_name: IDENTITY_GOVERNANCE_DATA_CACHE_MANAGER.to_string(),
            cache_name: IDENTITY_GOVERNANCE_DATA_CACHE.to_string(),
            user_store_domain: "PRIMARY".to_string(),
            tenant_id: SUPER_TENANT_ID,
            user_store_case_sensitive: true,
            case_sensitive_cache_keys: true,
        }
    }
}

/// Parses `name` from the environment, falling back to `default` when unset
/// or unparsable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
