//! Identity Record Model
//!
//! The per-user set of identity governance claims held in the cache.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// == Identity Record ==
/// One user's identity governance claims.
///
/// Records are cached by value: the cache hands out clones and never mutates
/// what it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Username the record belongs to, possibly domain qualified
    pub username: String,
    /// Claim URI to claim value
    #[serde(default)]
    pub claims: BTreeMap<String, String>,
}

impl IdentityRecord {
    /// Creates an empty record for the given user.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            claims: BTreeMap::new(),
        }
    }

    /// Builder-style claim insertion.
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_claim(name, value);
        self
    }

    /// Sets a claim, returning the previous value if one was present.
    pub fn set_claim(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.claims.insert(name.into(), value.into())
    }

    /// Returns the value of a claim.
    pub fn claim(&self, name: &str) -> Option<&str> {
        self.claims.get(name).map(String::as_str)
    }

    /// Renders the claims as `{[name = value], ...}` for debug logging.
    pub fn claims_summary(&self) -> String {
        let body = self
            .claims
            .iter()
            .map(|(name, value)| format!("[{} = {}]", name, value))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{}}}", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_claims() {
        let mut record = IdentityRecord::new("alice").with_claim("email", "a@x.com");
        assert_eq!(record.claim("email"), Some("a@x.com"));
        assert_eq!(record.claim("phone"), None);

        let previous = record.set_claim("email", "b@x.com");
        assert_eq!(previous.as_deref(), Some("a@x.com"));
        assert_eq!(record.claim("email"), Some("b@x.com"));
    }

    #[test]
    fn test_claims_summary() {
        let record = IdentityRecord::new("alice")
            .with_claim("locked", "false")
            .with_claim("email", "a@x.com");
        assert_eq!(record.claims_summary(), "{[email = a@x.com], [locked = false]}");
        assert_eq!(IdentityRecord::new("bob").claims_summary(), "{}");
    }

    #[test]
    fn test_record_deserialize_without_claims() {
        let record: IdentityRecord = serde_json::from_str(r#"{"username": "alice"}"#).unwrap();
        assert_eq!(record, IdentityRecord::new("alice"));
    }
}
