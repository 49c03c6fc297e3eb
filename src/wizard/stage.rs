//! Registration wizard stages

use serde::{Deserialize, Serialize};

/// Current stage of the citizenship registration wizard.
///
/// The flow is linear through the input stages, then branches from
/// `Checking` into exactly one result stage. Exactly one stage is
/// active at a time; transitions only move forward or to a terminal
/// result. Reopening the dialog resets to [`Stage::ConnectSocial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Connect at least one verified social identity
    ConnectSocial,
    /// Link wallets and wait for eligibility checks
    LinkWallets,
    /// Nominate the governance address
    SelectGovernance,
    /// Qualification request in flight
    Checking,
    /// Qualified; attestation issuing follows after the pacing delay
    ResultReady,
    ResultNeedsVerification,
    ResultPriorityRequired,
    ResultRegistrationClosed,
    ResultAlreadyRegistered,
    ResultBlocked,
    ResultNotEligible,
    /// Attestation call in flight
    IssuingAttestation,
    /// Citizenship attestation issued
    Complete,
    /// Generic failure; close and reopen to retry
    ResultError,
}

impl Stage {
    pub fn title(&self) -> &'static str {
        match self {
            Self::ConnectSocial => "Connect Identity",
            Self::LinkWallets => "Link Wallets",
            Self::SelectGovernance => "Governance Address",
            Self::Checking => "Checking Qualification",
            Self::ResultReady => "Qualified",
            Self::ResultNeedsVerification => "Verification Needed",
            Self::ResultPriorityRequired => "Priority Access Only",
            Self::ResultRegistrationClosed => "Registration Closed",
            Self::ResultAlreadyRegistered => "Already Registered",
            Self::ResultBlocked => "Not Available",
            Self::ResultNotEligible => "Not Eligible",
            Self::IssuingAttestation => "Issuing Attestation",
            Self::Complete => "Welcome, Citizen",
            Self::ResultError => "Something Went Wrong",
        }
    }

    /// 1-based position for the progress indicator; result stages share
    /// the final slot.
    pub fn step_number(&self) -> usize {
        match self {
            Self::ConnectSocial => 1,
            Self::LinkWallets => 2,
            Self::SelectGovernance => 3,
            Self::Checking | Self::IssuingAttestation => 4,
            _ => Self::total_steps(),
        }
    }

    pub fn total_steps() -> usize {
        5
    }

    /// Input stages accept user actions; everything else is driven by
    /// the submission chain.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Self::ConnectSocial | Self::LinkWallets | Self::SelectGovernance
        )
    }

    /// Terminal stages only offer dismissal; the wizard must be closed
    /// and reopened to try again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::ResultNeedsVerification
                | Self::ResultPriorityRequired
                | Self::ResultRegistrationClosed
                | Self::ResultAlreadyRegistered
                | Self::ResultBlocked
                | Self::ResultNotEligible
                | Self::Complete
                | Self::ResultError
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_stages() {
        assert!(Stage::ConnectSocial.is_input());
        assert!(Stage::LinkWallets.is_input());
        assert!(Stage::SelectGovernance.is_input());
        assert!(!Stage::Checking.is_input());
        assert!(!Stage::Complete.is_input());
    }

    #[test]
    fn test_terminal_stages() {
        assert!(Stage::Complete.is_terminal());
        assert!(Stage::ResultError.is_terminal());
        assert!(Stage::ResultBlocked.is_terminal());
        // ResultReady continues into the attestation chain
        assert!(!Stage::ResultReady.is_terminal());
        assert!(!Stage::Checking.is_terminal());
        assert!(!Stage::IssuingAttestation.is_terminal());
    }

    #[test]
    fn test_step_numbers_fit_total() {
        for stage in [
            Stage::ConnectSocial,
            Stage::LinkWallets,
            Stage::SelectGovernance,
            Stage::Checking,
            Stage::ResultReady,
            Stage::Complete,
        ] {
            assert!(stage.step_number() >= 1);
            assert!(stage.step_number() <= Stage::total_steps());
        }
    }
}
