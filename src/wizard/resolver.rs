//! Qualification status to result stage mapping

use super::stage::Stage;
use crate::qualification::QualificationStatus;

/// Map a qualification status to the result stage the wizard enters.
///
/// Exhaustive over the closed status set; `Unknown` (a status this
/// client version does not recognize) lands in the generic error stage
/// so a newer server cannot strand the dialog in `Checking`.
pub fn resolve_result_stage(status: QualificationStatus) -> Stage {
    match status {
        QualificationStatus::Ready => Stage::ResultReady,
        QualificationStatus::NeedsVerification => Stage::ResultNeedsVerification,
        QualificationStatus::PriorityRequired => Stage::ResultPriorityRequired,
        QualificationStatus::RegistrationClosed => Stage::ResultRegistrationClosed,
        QualificationStatus::AlreadyRegistered => Stage::ResultAlreadyRegistered,
        QualificationStatus::Blocked => Stage::ResultBlocked,
        QualificationStatus::NotEligible => Stage::ResultNotEligible,
        QualificationStatus::Unknown => Stage::ResultError,
    }
}
