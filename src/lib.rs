//! Retro Funding Citizen Portal
//!
//! The registration and qualification layer of the retroactive-funding
//! portal: the citizenship registration wizard, the wallet eligibility
//! checker, and the qualification/attestation services behind them.
//!
//! ## Module Structure
//!
//! - `types`: addresses, social identities, shared constants
//! - `wizard/`: the registration state machine (stages, controller, resolver)
//! - `eligibility`: per-wallet eligibility bookkeeping
//! - `qualification`: qualification request/result wire types
//! - `attestation`: citizenship attestation records
//! - `client`: the portal backend seam and HTTP implementation
//! - `registry`: server-side qualification and registration state
//! - `server`: axum routes over the registry
//! - `dialog`: app-wide dialog registry
//! - `config`: windows, trust weights, wizard pacing

/// Shared core types
pub mod types;

/// Portal error types
pub mod error;

/// Portal configuration
pub mod config;

/// Wallet eligibility bookkeeping
pub mod eligibility;

/// Qualification wire types
pub mod qualification;

/// Citizenship attestations
pub mod attestation;

/// Backend seam and HTTP client
pub mod client;

/// Registration wizard state machine
pub mod wizard;

/// Server-side citizen registry
pub mod registry;

/// Portal HTTP server
pub mod server;

/// Dialog registry
pub mod dialog;

pub use attestation::AttestationRecord;
pub use client::{EligibilityResponse, PortalBackend, PortalClient};
pub use config::{PortalConfig, RegistrationConfig, TrustConfig, WizardConfig};
pub use dialog::{DialogController, DialogId};
pub use eligibility::{EligibilityMap, WalletEligibility};
pub use error::PortalError;
pub use qualification::{
    QualificationResult, QualificationStatus, QualifyRequest, TrustBreakdown,
};
pub use registry::{CitizenRegistry, RegistrySnapshot};
pub use server::{PortalServerState, router as portal_router};
pub use types::{Address, SocialIdentity, SocialProvider, CITIZENSHIP_SCHEMA};
pub use wizard::{resolve_result_stage, RegistrationWizard, Stage};
