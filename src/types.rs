//! Core types shared across the portal
//!
//! Wallet addresses, social identities, and the attestation schema
//! constants used by both the wizard and the portal server.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attestation schema identifier for citizenship records
pub const CITIZENSHIP_SCHEMA: &str = "retro.citizenship.v1";

/// A wallet address, normalized to lowercase.
///
/// All eligibility bookkeeping keys on the lowercased form so that the
/// same wallet entered with mixed casing never produces two entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Normalize without validating. Use [`Address::parse`] for user input.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    /// Parse and validate a 0x-prefixed 20-byte hex address.
    pub fn parse(raw: &str) -> Result<Self, crate::error::PortalError> {
        let trimmed = raw.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| crate::error::PortalError::InvalidAddress(trimmed.to_string()))?;
        if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(crate::error::PortalError::InvalidAddress(trimmed.to_string()));
        }
        Ok(Self::new(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for display: `0x1234..abcd`
    pub fn short(&self) -> String {
        if self.0.len() > 12 {
            format!("{}..{}", &self.0[..6], &self.0[self.0.len() - 4..])
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Address::new(raw))
    }
}

/// Supported social identity providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Farcaster,
    Github,
    Discord,
    Email,
}

impl SocialProvider {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Farcaster => "Farcaster",
            Self::Github => "GitHub",
            Self::Discord => "Discord",
            Self::Email => "Email",
        }
    }

    pub const ALL: [SocialProvider; 4] = [
        SocialProvider::Farcaster,
        SocialProvider::Github,
        SocialProvider::Discord,
        SocialProvider::Email,
    ];
}

/// A social identity connected to the user's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialIdentity {
    pub provider: SocialProvider,
    pub handle: String,
    /// Whether the provider-side verification completed
    pub verified: bool,
}

impl SocialIdentity {
    pub fn verified(provider: SocialProvider, handle: impl Into<String>) -> Self {
        Self {
            provider,
            handle: handle.into(),
            verified: true,
        }
    }

    pub fn unverified(provider: SocialProvider, handle: impl Into<String>) -> Self {
        Self {
            provider,
            handle: handle.into(),
            verified: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_normalizes_case() {
        let a = Address::new("0xABCDef0123456789abcdef0123456789ABCDEF01");
        let b = Address::new("0xabcdef0123456789abcdef0123456789abcdef01");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn test_address_parse_rejects_bad_input() {
        assert!(Address::parse("0x1234").is_err());
        assert!(Address::parse("abcdef0123456789abcdef0123456789abcdef01").is_err());
        assert!(Address::parse("0xzzzzef0123456789abcdef0123456789abcdef01").is_err());
        assert!(Address::parse("0xABCDef0123456789abcdef0123456789ABCDEF01").is_ok());
    }

    #[test]
    fn test_address_short_display() {
        let a = Address::new("0xabcdef0123456789abcdef0123456789abcdef01");
        assert_eq!(a.short(), "0xabcd..ef01");
    }

    #[test]
    fn test_address_deserialize_lowercases() {
        let a: Address = serde_json::from_str("\"0xABCDef0123456789abcdef0123456789ABCDEF01\"")
            .unwrap();
        assert_eq!(a.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }
}
