//! Response DTOs for the identity cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::IdentityRecord;

/// Response body for a load (GET /identity/:domain/*username)
#[derive(Debug, Clone, Serialize)]
pub struct RecordResponse {
    /// User store domain the lookup ran against
    pub domain: String,
    /// Username as stored in the record
    pub username: String,
    pub claims: BTreeMap<String, String>,
}

impl RecordResponse {
    pub fn new(domain: impl Into<String>, record: IdentityRecord) -> Self {
        Self {
            domain: domain.into(),
            username: record.username,
            claims: record.claims,
        }
    }
}

/// Response body for a store (PUT /identity/:domain)
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    pub message: String,
    pub domain: String,
    pub username: String,
}

impl StoreResponse {
    pub fn new(domain: impl Into<String>, username: impl Into<String>) -> Self {
        let domain = domain.into();
        let username = username.into();
        Self {
            message: format!("Identity record for '{}' stored in {}", username, domain),
            domain,
            username,
        }
    }
}

/// Response body for a remove (DELETE /identity/:domain/*username)
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    pub message: String,
    pub domain: String,
    pub username: String,
}

impl RemoveResponse {
    pub fn new(domain: impl Into<String>, username: impl Into<String>) -> Self {
        let domain = domain.into();
        let username = username.into();
        Self {
            message: format!("Identity record for '{}' removed from {}", username, domain),
            domain,
            username,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Cache the statistics belong to
    pub cache: String,
    /// False until the cache has been provisioned
    pub provisioned: bool,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(cache: impl Into<String>, stats: Option<CacheStats>) -> Self {
        let provisioned = stats.is_some();
        let stats = stats.unwrap_or_default();
        Self {
            cache: cache.into(),
            provisioned,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// User store domains the service can key records for
    pub user_store_domains: Vec<String>,
}

impl HealthResponse {
    pub fn healthy(user_store_domains: Vec<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            user_store_domains,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
