//! Citizenship attestation types
//!
//! An attestation is the signed on-chain record confirming citizenship.
//! This module carries the request/record types and the uid derivation;
//! issuing is done by the portal server (see `registry`).

use crate::types::{Address, CITIZENSHIP_SCHEMA};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An issued attestation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttestationRecord {
    /// Hex-encoded attestation uid
    pub uid: String,
    pub schema: String,
    pub user_id: String,
    pub recipient: Address,
    pub issued_at: DateTime<Utc>,
}

impl AttestationRecord {
    /// Derive the attestation uid from recipient, schema, and a nonce.
    pub fn derive_uid(recipient: &Address, schema: &str, nonce: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(recipient.as_str().as_bytes());
        hasher.update(schema.as_bytes());
        hasher.update(nonce);
        hex::encode(hasher.finalize())
    }

    pub fn issue(user_id: impl Into<String>, recipient: Address, nonce: &[u8]) -> Self {
        let uid = Self::derive_uid(&recipient, CITIZENSHIP_SCHEMA, nonce);
        Self {
            uid,
            schema: CITIZENSHIP_SCHEMA.to_string(),
            user_id: user_id.into(),
            recipient,
            issued_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> Address {
        Address::new("0xabcdef0123456789abcdef0123456789abcdef01")
    }

    #[test]
    fn test_uid_is_deterministic_per_nonce() {
        let a = AttestationRecord::derive_uid(&addr(), CITIZENSHIP_SCHEMA, b"nonce-1");
        let b = AttestationRecord::derive_uid(&addr(), CITIZENSHIP_SCHEMA, b"nonce-1");
        let c = AttestationRecord::derive_uid(&addr(), CITIZENSHIP_SCHEMA, b"nonce-2");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_issue_fills_schema_and_recipient() {
        let record = AttestationRecord::issue("user-1", addr(), b"n");
        assert_eq!(record.schema, CITIZENSHIP_SCHEMA);
        assert_eq!(record.recipient, addr());
        assert_eq!(record.user_id, "user-1");
    }
}
