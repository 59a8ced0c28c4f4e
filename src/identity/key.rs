//! Cache Key Module
//!
//! Reduces a raw username to the canonical key a user's identity record is
//! cached under.
//!
//! A key is `domain_name + tenant_id + username` with no delimiter. Keys
//! written by earlier deployments use the same layout, so the composition
//! must not change: a different layout makes every existing entry
//! unreachable. The price is that adjacent fields can collide, e.g.
//! (`"A1"`, 1, `"x"`) and (`"A"`, 11, `"x"`) both give `"A11x"`.

use std::fmt;

use tracing::debug;

use crate::error::{IdentityCacheError, Result};
use crate::identity::CaseSensitivityAware;

// == Constants ==
/// Separator between a user-store domain and the bare username.
pub const DOMAIN_SEPARATOR: char = '/';

/// Domains that qualify role-like names rather than user stores. Names in
/// these domains keep their prefix.
const RESERVED_DOMAINS: [&str; 3] = ["Internal", "Application", "Workflow"];

// == Cache Key ==
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// == Case Sensitivity Policy ==
/// Case flags read from a user store for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseSensitivityPolicy {
    pub store_case_sensitive: bool,
    pub case_sensitive_cache_keys: bool,
}

impl CaseSensitivityPolicy {
    pub fn new(store_case_sensitive: bool, case_sensitive_cache_keys: bool) -> Self {
        Self {
            store_case_sensitive,
            case_sensitive_cache_keys,
        }
    }

    /// Reads both flags from the store.
    pub fn from_store(store: &dyn CaseSensitivityAware) -> Self {
        Self::new(store.is_case_sensitive(), store.is_case_sensitive_for_cache_keys())
    }

    /// Whether usernames are lower-cased before keying.
    ///
    /// The cache-key flag only matters for a case-sensitive store.
    pub fn lowercases_username(&self) -> bool {
        !self.store_case_sensitive || !self.case_sensitive_cache_keys
    }
}

// == Strip Domain ==
/// Removes a user-store domain qualifier from `name`.
///
/// Everything up to the last separator is dropped, so the result never
/// contains a separator and stripping again changes nothing. Names qualified
/// by a reserved domain, or starting with the separator, are returned as is.
pub fn strip_domain(name: &str) -> &str {
    let Some(first) = name.find(DOMAIN_SEPARATOR) else {
        return name;
    };
    if first == 0 {
        return name;
    }

    let domain = &name[..first];
    if RESERVED_DOMAINS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(domain))
    {
        return name;
    }

    match name.rfind(DOMAIN_SEPARATOR) {
        Some(last) => &name[last + DOMAIN_SEPARATOR.len_utf8()..],
        None => name,
    }
}

// == Build Key ==
/// Derives the cache key for `raw_username`.
///
/// # Arguments
/// * `raw_username` - Username, optionally domain qualified
/// * `domain_name` - Configured domain of the user store
/// * `tenant_id` - Tenant the user store belongs to
/// * `policy` - Case handling for the username
///
/// # Errors
/// `InvalidInput` for an empty username. Callers are expected to screen
/// those out first.
pub fn build_key(
    raw_username: &str,
    domain_name: &str,
    tenant_id: i32,
    policy: CaseSensitivityPolicy,
) -> Result<CacheKey> {
    if raw_username.is_empty() {
        return Err(IdentityCacheError::InvalidInput(
            "username must not be empty".to_string(),
        ));
    }

    let bare = strip_domain(raw_username);
    let username = if policy.lowercases_username() {
        let lowered = bare.to_lowercase();
        if lowered != bare {
            if policy.store_case_sensitive {
                debug!(from = bare, to = %lowered, "Case insensitive username for cache key is used");
            } else {
                debug!(from = bare, to = %lowered, "Case insensitive user store found");
            }
        }
        lowered
    } else {
        bare.to_string()
    };

    Ok(CacheKey(format!("{}{}{}", domain_name, tenant_id, username)))
}
