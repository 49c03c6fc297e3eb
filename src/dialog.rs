//! Application dialog registry
//!
//! A single owner for "which dialog is open" instead of ad hoc boolean
//! flags scattered per dialog. At most one dialog is open at a time;
//! opening a different one closes the previous.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Every dialog the portal can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogId {
    CitizenshipRegistration,
    FundingRoundApplication,
    RewardsClaim,
    ProfileEditor,
}

impl DialogId {
    pub fn title(&self) -> &'static str {
        match self {
            Self::CitizenshipRegistration => "Citizenship Registration",
            Self::FundingRoundApplication => "Funding Round Application",
            Self::RewardsClaim => "Claim Rewards",
            Self::ProfileEditor => "Edit Profile",
        }
    }
}

/// Single owner of the open-dialog state, shareable via `Arc`
#[derive(Debug, Default)]
pub struct DialogController {
    open: RwLock<Option<DialogId>>,
}

impl DialogController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `dialog`, closing whichever dialog was open before.
    /// Returns the previously open dialog, if any.
    pub fn open(&self, dialog: DialogId) -> Option<DialogId> {
        self.open.write().replace(dialog)
    }

    pub fn close(&self) -> Option<DialogId> {
        self.open.write().take()
    }

    pub fn current(&self) -> Option<DialogId> {
        *self.open.read()
    }

    pub fn is_open(&self, dialog: DialogId) -> bool {
        self.current() == Some(dialog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_most_one_dialog_open() {
        let dialogs = DialogController::new();
        assert_eq!(dialogs.current(), None);

        assert_eq!(dialogs.open(DialogId::CitizenshipRegistration), None);
        assert!(dialogs.is_open(DialogId::CitizenshipRegistration));

        // Opening another dialog closes the first
        let previous = dialogs.open(DialogId::RewardsClaim);
        assert_eq!(previous, Some(DialogId::CitizenshipRegistration));
        assert!(!dialogs.is_open(DialogId::CitizenshipRegistration));
        assert!(dialogs.is_open(DialogId::RewardsClaim));
    }

    #[test]
    fn test_close_is_idempotent() {
        let dialogs = DialogController::new();
        dialogs.open(DialogId::ProfileEditor);
        assert_eq!(dialogs.close(), Some(DialogId::ProfileEditor));
        assert_eq!(dialogs.close(), None);
        assert_eq!(dialogs.current(), None);
    }
}
