//! Request DTOs for the identity cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::models::IdentityRecord;

/// Request body for storing a record (PUT /identity/:domain)
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRecordRequest {
    /// Username the claims belong to, optionally domain qualified
    pub username: String,
    /// Claim URI to claim value
    #[serde(default)]
    pub claims: BTreeMap<String, String>,
}

impl StoreRecordRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.username.trim().is_empty() {
            return Some("Username cannot be empty".to_string());
        }
        if self.claims.keys().any(|name| name.is_empty()) {
            return Some("Claim names cannot be empty".to_string());
        }
        None
    }

    pub fn into_record(self) -> IdentityRecord {
        IdentityRecord {
            username: self.username,
            claims: self.claims,
        }
    }
}
