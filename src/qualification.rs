//! Qualification request/response types
//!
//! The qualification contract is: submit a governance address + user id
//! (plus the identity signals the trust score is computed from) and
//! receive a status from a closed set, an optional message, and the
//! trust-score breakdown. A result is created once per submission
//! attempt and never mutated afterwards.

use crate::types::{Address, SocialIdentity};
use serde::{Deserialize, Serialize};

/// Status returned by the qualification service.
///
/// The set is closed on the server side, but clients must tolerate
/// statuses added by newer deployments: anything unrecognized
/// deserializes to [`QualificationStatus::Unknown`] and is surfaced as
/// a generic error rather than a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualificationStatus {
    /// Qualified; an attestation can be issued
    Ready,
    /// Trust score suffices but identity verification is missing
    NeedsVerification,
    /// Registration is currently limited to priority-access users
    PriorityRequired,
    /// The registration window is not open
    RegistrationClosed,
    /// The user already holds a citizenship attestation
    AlreadyRegistered,
    /// The user is blocked from the program
    Blocked,
    /// Trust score below the qualification threshold
    NotEligible,
    /// Any status this client version does not know about
    #[serde(other)]
    Unknown,
}

impl QualificationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::NeedsVerification => "Needs verification",
            Self::PriorityRequired => "Priority access required",
            Self::RegistrationClosed => "Registration closed",
            Self::AlreadyRegistered => "Already registered",
            Self::Blocked => "Blocked",
            Self::NotEligible => "Not eligible",
            Self::Unknown => "Unknown status",
        }
    }
}

/// Per-signal trust score contributions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrustBreakdown {
    /// Points from verified social identities
    pub social_verification: u32,
    /// Points from holding an eligible wallet
    pub wallet_eligibility: u32,
    /// Points from prior governance participation
    pub governance_participation: u32,
}

impl TrustBreakdown {
    pub fn total(&self) -> u32 {
        self.social_verification + self.wallet_eligibility + self.governance_participation
    }
}

/// Request submitted when the user completes the wizard's input stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualifyRequest {
    pub user_id: String,
    /// Wallet nominated to receive the citizenship attestation
    pub governance_address: Address,
    /// All linked wallets, for trust scoring
    pub wallets: Vec<Address>,
    /// Connected social identities, for trust scoring
    pub socials: Vec<SocialIdentity>,
}

/// Outcome of one qualification attempt. Immutable once created;
/// discarded when the registration dialog closes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualificationResult {
    pub status: QualificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub trust: TrustBreakdown,
}

impl QualificationResult {
    pub fn new(status: QualificationStatus, trust: TrustBreakdown) -> Self {
        Self {
            status,
            message: None,
            trust,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&QualificationStatus::NeedsVerification).unwrap();
        assert_eq!(json, "\"NEEDS_VERIFICATION\"");

        let parsed: QualificationStatus = serde_json::from_str("\"READY\"").unwrap();
        assert_eq!(parsed, QualificationStatus::Ready);
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let parsed: QualificationStatus =
            serde_json::from_str("\"SOME_FUTURE_STATUS\"").unwrap();
        assert_eq!(parsed, QualificationStatus::Unknown);
    }

    #[test]
    fn test_trust_total() {
        let trust = TrustBreakdown {
            social_verification: 30,
            wallet_eligibility: 40,
            governance_participation: 10,
        };
        assert_eq!(trust.total(), 80);
    }

    #[test]
    fn test_result_without_message_omits_field() {
        let result = QualificationResult::new(
            QualificationStatus::Ready,
            TrustBreakdown::default(),
        );
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("message"));
    }
}
