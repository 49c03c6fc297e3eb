//! Citizenship registration wizard
//!
//! The state machine behind the season registration dialog:
//! 1. Connect a verified social identity
//! 2. Link wallets and check eligibility
//! 3. Nominate a governance address
//! 4. Submit qualification and, when READY, issue the attestation

pub mod controller;
pub mod resolver;
pub mod stage;

pub use controller::RegistrationWizard;
pub use resolver::resolve_result_stage;
pub use stage::Stage;
