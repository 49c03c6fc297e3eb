//! Citizen registry
//!
//! Server-side qualification and registration state: the eligibility
//! snapshot, priority/block lists, prior governance participation, and
//! the issued citizenship attestations. The qualification verdict is
//! computed here; the HTTP layer in `server` is a thin wrapper.

use crate::attestation::AttestationRecord;
use crate::config::{RegistrationConfig, TrustConfig};
use crate::error::PortalError;
use crate::qualification::{
    QualificationResult, QualificationStatus, QualifyRequest, TrustBreakdown,
};
use crate::types::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Bulk registry data, loadable from a JSON snapshot file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    #[serde(default)]
    pub eligible_wallets: Vec<Address>,
    #[serde(default)]
    pub priority_users: Vec<String>,
    #[serde(default)]
    pub blocked_users: Vec<String>,
    #[serde(default)]
    pub participants: Vec<String>,
}

pub struct CitizenRegistry {
    registration: RegistrationConfig,
    trust: TrustConfig,
    eligible_wallets: HashSet<Address>,
    priority_users: HashSet<String>,
    blocked_users: HashSet<String>,
    /// Users with prior governance participation
    participants: HashSet<String>,
    citizens: HashMap<String, AttestationRecord>,
}

impl CitizenRegistry {
    pub fn new(registration: RegistrationConfig, trust: TrustConfig) -> Self {
        Self {
            registration,
            trust,
            eligible_wallets: HashSet::new(),
            priority_users: HashSet::new(),
            blocked_users: HashSet::new(),
            participants: HashSet::new(),
            citizens: HashMap::new(),
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: RegistrySnapshot) {
        info!(
            eligible = snapshot.eligible_wallets.len(),
            priority = snapshot.priority_users.len(),
            blocked = snapshot.blocked_users.len(),
            participants = snapshot.participants.len(),
            "applying registry snapshot"
        );
        self.eligible_wallets.extend(snapshot.eligible_wallets);
        self.priority_users.extend(snapshot.priority_users);
        self.blocked_users.extend(snapshot.blocked_users);
        self.participants.extend(snapshot.participants);
    }

    pub fn add_eligible_wallet(&mut self, address: Address) {
        self.eligible_wallets.insert(address);
    }

    pub fn grant_priority(&mut self, user_id: impl Into<String>) {
        self.priority_users.insert(user_id.into());
    }

    pub fn block_user(&mut self, user_id: impl Into<String>) {
        self.blocked_users.insert(user_id.into());
    }

    pub fn record_participation(&mut self, user_id: impl Into<String>) {
        self.participants.insert(user_id.into());
    }

    pub fn wallet_eligible(&self, address: &Address) -> bool {
        self.eligible_wallets.contains(address)
    }

    pub fn citizen(&self, user_id: &str) -> Option<&AttestationRecord> {
        self.citizens.get(user_id)
    }

    pub fn citizen_count(&self) -> usize {
        self.citizens.len()
    }

    fn trust_breakdown(&self, request: &QualifyRequest) -> TrustBreakdown {
        let verified_social = request.socials.iter().any(|s| s.verified);
        let eligible_wallet = request
            .wallets
            .iter()
            .chain(std::iter::once(&request.governance_address))
            .any(|w| self.eligible_wallets.contains(w));
        let participated = self.participants.contains(&request.user_id);

        TrustBreakdown {
            social_verification: if verified_social {
                self.trust.social_weight
            } else {
                0
            },
            wallet_eligibility: if eligible_wallet {
                self.trust.wallet_weight
            } else {
                0
            },
            governance_participation: if participated {
                self.trust.participation_weight
            } else {
                0
            },
        }
    }

    /// Evaluate a qualification request at `now`.
    ///
    /// Precedence: blocked, then closed window, then already
    /// registered, then the priority window, then the trust threshold,
    /// then missing identity verification.
    pub fn qualify(&self, request: &QualifyRequest, now: DateTime<Utc>) -> QualificationResult {
        let trust = self.trust_breakdown(request);

        if self.blocked_users.contains(&request.user_id) {
            return QualificationResult::new(QualificationStatus::Blocked, trust);
        }
        if !self.registration.is_open(now) {
            return QualificationResult::new(QualificationStatus::RegistrationClosed, trust)
                .with_message("the registration window is not open");
        }
        if self.citizens.contains_key(&request.user_id) {
            return QualificationResult::new(QualificationStatus::AlreadyRegistered, trust);
        }
        if self.registration.in_priority_window(now)
            && !self.priority_users.contains(&request.user_id)
        {
            return QualificationResult::new(QualificationStatus::PriorityRequired, trust)
                .with_message("registration is limited to priority access for now");
        }
        if trust.total() < self.trust.qualification_threshold {
            return QualificationResult::new(QualificationStatus::NotEligible, trust.clone())
                .with_message(format!(
                    "trust score {} is below the threshold of {}",
                    trust.total(),
                    self.trust.qualification_threshold
                ));
        }
        if trust.social_verification == 0 {
            return QualificationResult::new(QualificationStatus::NeedsVerification, trust)
                .with_message("verify a social identity to continue");
        }
        QualificationResult::new(QualificationStatus::Ready, trust)
    }

    /// Issue a citizenship attestation to the nominated governance
    /// address. The request is re-qualified at issue time; only a READY
    /// verdict registers the citizen.
    pub fn register(
        &mut self,
        request: &QualifyRequest,
        now: DateTime<Utc>,
    ) -> Result<AttestationRecord, PortalError> {
        let result = self.qualify(request, now);
        match result.status {
            QualificationStatus::Ready => {}
            QualificationStatus::RegistrationClosed => {
                return Err(PortalError::RegistrationClosed)
            }
            _ => return Err(PortalError::NotQualified(request.user_id.clone())),
        }

        let nonce: [u8; 16] = rand::random();
        let record = AttestationRecord::issue(
            request.user_id.clone(),
            request.governance_address.clone(),
            &nonce,
        );
        info!(user = %record.user_id, uid = %record.uid, "citizen registered");
        self.citizens.insert(request.user_id.clone(), record.clone());
        Ok(record)
    }
}
