//! Registration wizard controller
//!
//! Owns all transient state of one open registration dialog: the
//! current stage, connected identities, linked wallets and their
//! eligibility verdicts, the nominated governance address, and the
//! result of the last qualification attempt. Nothing here is persisted;
//! the remote portal is the only durable store.
//!
//! All async work is awaited inside the calling future (the wallet
//! fan-out uses `join_all` over plain client futures, the pacing delay
//! is a `tokio::time::sleep`). Dropping the future abandons in-flight
//! work, so a closed dialog can never mutate state it no longer owns.

use super::resolver::resolve_result_stage;
use super::stage::Stage;
use crate::attestation::AttestationRecord;
use crate::client::PortalBackend;
use crate::config::WizardConfig;
use crate::eligibility::{EligibilityMap, WalletEligibility};
use crate::qualification::{QualificationResult, QualifyRequest};
use crate::types::{Address, SocialIdentity};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct RegistrationWizard<B: PortalBackend> {
    backend: Arc<B>,
    config: WizardConfig,
    user_id: String,

    stage: Stage,
    history: Vec<Stage>,

    socials: Vec<SocialIdentity>,
    wallets: Vec<Address>,
    eligibility: EligibilityMap,
    governance: Option<Address>,

    result: Option<QualificationResult>,
    attestation: Option<AttestationRecord>,
}

impl<B: PortalBackend> RegistrationWizard<B> {
    pub fn new(backend: Arc<B>, config: WizardConfig, user_id: impl Into<String>) -> Self {
        Self {
            backend,
            config,
            user_id: user_id.into(),
            stage: Stage::ConnectSocial,
            history: vec![Stage::ConnectSocial],
            socials: Vec::new(),
            wallets: Vec::new(),
            eligibility: EligibilityMap::new(),
            governance: None,
            result: None,
            attestation: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Every stage entered since the dialog was (re)opened, in order
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    pub fn socials(&self) -> &[SocialIdentity] {
        &self.socials
    }

    pub fn wallets(&self) -> &[Address] {
        &self.wallets
    }

    pub fn eligibility(&self) -> &EligibilityMap {
        &self.eligibility
    }

    pub fn governance(&self) -> Option<&Address> {
        self.governance.as_ref()
    }

    pub fn result(&self) -> Option<&QualificationResult> {
        self.result.as_ref()
    }

    pub fn attestation(&self) -> Option<&AttestationRecord> {
        self.attestation.as_ref()
    }

    fn enter(&mut self, stage: Stage) {
        debug!(from = ?self.stage, to = ?stage, "wizard transition");
        self.stage = stage;
        self.history.push(stage);
    }

    /// Whether the current stage's validity predicate is satisfied
    pub fn can_advance(&self) -> bool {
        match self.stage {
            Stage::ConnectSocial => self.socials.iter().any(|s| s.verified),
            Stage::LinkWallets => self.eligibility.any_pass(),
            // Submission is the only way out of the last input stage
            _ => false,
        }
    }

    /// Move to the next input stage. No-op unless the current stage's
    /// validity predicate holds.
    pub fn advance(&mut self) -> Stage {
        if !self.can_advance() {
            debug!(stage = ?self.stage, "advance rejected: predicate unmet");
            return self.stage;
        }
        match self.stage {
            Stage::ConnectSocial => self.enter(Stage::LinkWallets),
            Stage::LinkWallets => self.enter(Stage::SelectGovernance),
            _ => {}
        }
        self.stage
    }

    pub fn connect_social(&mut self, identity: SocialIdentity) {
        self.socials.push(identity);
    }

    /// Link a wallet to the session. Deduplicates on the normalized
    /// address; the eligibility check runs later via [`check_wallets`].
    ///
    /// [`check_wallets`]: RegistrationWizard::check_wallets
    pub fn link_wallet(&mut self, address: Address) {
        if !self.wallets.contains(&address) {
            self.wallets.push(address);
        }
    }

    /// Nominate a governance address. Only wallets that settled to
    /// `Pass` are accepted.
    pub fn select_governance(&mut self, address: Address) -> bool {
        if self.eligibility.get(&address) == Some(WalletEligibility::Pass) {
            self.governance = Some(address);
            true
        } else {
            false
        }
    }

    /// Check eligibility for every linked wallet that has no verdict
    /// yet. Unseen addresses are marked `Checking` up front, one
    /// request per address runs concurrently, and the settled verdicts
    /// are folded back in one batch. Addresses already in the map are
    /// never re-queried.
    pub async fn check_wallets(&mut self) {
        let pending = self.eligibility.pending(self.wallets.iter());
        if pending.is_empty() {
            return;
        }
        for address in &pending {
            self.eligibility.mark_checking(address.clone());
        }

        let checks = pending.into_iter().map(|address| {
            let backend = Arc::clone(&self.backend);
            async move {
                let verdict = match backend.wallet_eligibility(&address).await {
                    Ok(true) => WalletEligibility::Pass,
                    Ok(false) => WalletEligibility::Fail,
                    Err(e) => {
                        warn!(%address, error = %e, "eligibility check failed");
                        WalletEligibility::Fail
                    }
                };
                (address, verdict)
            }
        });

        for (address, verdict) in join_all(checks).await {
            self.eligibility.settle(address, verdict);
        }
    }

    /// Submit the qualification request and drive the dialog to a
    /// terminal stage. Only reachable from `SelectGovernance` with a
    /// nominated address; otherwise a no-op.
    ///
    /// On a READY result the attestation chain follows: wait the
    /// configured pacing delay, enter `IssuingAttestation`, call the
    /// portal, then land in `Complete` or `ResultError`. Any rejected
    /// call lands in `ResultError`; there are no retries.
    pub async fn submit_qualification(&mut self) -> Stage {
        if self.stage != Stage::SelectGovernance {
            debug!(stage = ?self.stage, "submit rejected: not at governance stage");
            return self.stage;
        }
        let Some(governance) = self.governance.clone() else {
            debug!("submit rejected: no governance address selected");
            return self.stage;
        };

        self.enter(Stage::Checking);

        let request = QualifyRequest {
            user_id: self.user_id.clone(),
            governance_address: governance,
            wallets: self.wallets.clone(),
            socials: self.socials.clone(),
        };

        let result = match self.backend.submit_qualification(&request).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "qualification request failed");
                self.enter(Stage::ResultError);
                return self.stage;
            }
        };

        info!(status = ?result.status, trust = result.trust.total(), "qualification resolved");
        let next = resolve_result_stage(result.status);
        self.result = Some(result);
        self.enter(next);

        if next == Stage::ResultReady {
            tokio::time::sleep(self.config.attestation_delay()).await;
            self.enter(Stage::IssuingAttestation);

            match self.backend.issue_attestation(&request).await {
                Ok(record) => {
                    info!(uid = %record.uid, "citizenship attestation issued");
                    self.attestation = Some(record);
                    self.enter(Stage::Complete);
                }
                Err(e) => {
                    warn!(error = %e, "attestation issuing failed");
                    self.enter(Stage::ResultError);
                }
            }
        }

        self.stage
    }

    /// Reopen the dialog: back to the initial stage with eligibility,
    /// result, and selection state cleared. Connected identities and
    /// linked wallets belong to the profile and survive.
    pub fn reset(&mut self) {
        self.stage = Stage::ConnectSocial;
        self.history = vec![Stage::ConnectSocial];
        self.eligibility.clear();
        self.governance = None;
        self.result = None;
        self.attestation = None;
    }
}
