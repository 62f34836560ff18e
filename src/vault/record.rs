//! The secret record sealed inside the blob, and the resolved credentials
//! handed back to callers.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The two-field record that gets encrypted to disk.
///
/// Serialized as compact JSON: `{"identifier":"…","secret":"…"}`.
/// Both strings are wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(deny_unknown_fields)]
pub struct SecretRecord {
    /// Account identifier, e.g. an email address.
    pub identifier: String,

    /// The secret token for that account.
    pub secret: String,
}

impl SecretRecord {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for SecretRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretRecord")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Where a resolved credential pair came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// The environment-override variables.
    Environment,
    /// The encrypted blob on disk.
    Vault,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Environment => f.write_str("environment"),
            CredentialSource::Vault => f.write_str("vault"),
        }
    }
}

/// A resolved (identifier, secret) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    record: SecretRecord,
    source: CredentialSource,
}

impl Credentials {
    pub fn new(record: SecretRecord, source: CredentialSource) -> Self {
        Self { record, source }
    }

    pub fn identifier(&self) -> &str {
        &self.record.identifier
    }

    pub fn secret(&self) -> &str {
        &self.record.secret
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    /// Returns the pair as borrowed strings.
    pub fn as_pair(&self) -> (&str, &str) {
        (self.identifier(), self.secret())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_compact_two_field_json() {
        let record = SecretRecord::new("alice@example.com", "tok_abc123");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"identifier":"alice@example.com","secret":"tok_abc123"}"#
        );
    }

    #[test]
    fn debug_redacts_secret() {
        let record = SecretRecord::new("bob", "hunter2");
        let shown = format!("{record:?}");
        assert!(shown.contains("bob"));
        assert!(!shown.contains("hunter2"));

        let creds = Credentials::new(record, CredentialSource::Vault);
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let json = r#"{"identifier":"a","secret":"b","extra":1}"#;
        assert!(serde_json::from_str::<SecretRecord>(json).is_err());
    }
}
