//! Wallet eligibility bookkeeping
//!
//! Each candidate wallet is checked against the eligibility snapshot
//! exactly once per wizard session. The map is keyed by lowercased
//! address; entries are only added or overwritten, never removed while
//! the session is open.

use crate::types::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Eligibility verdict for a single wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletEligibility {
    /// Request in flight
    Checking,
    /// Wallet is in the eligibility snapshot
    Pass,
    /// Wallet is not eligible, or the check failed
    Fail,
}

/// Per-address eligibility state for one wizard session
#[derive(Debug, Clone, Default)]
pub struct EligibilityMap {
    entries: HashMap<Address, WalletEligibility>,
}

impl EligibilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Addresses from `candidates` that have no entry yet and therefore
    /// still need a check. Already-settled (or in-flight) addresses are
    /// skipped so a wallet is never re-queried.
    pub fn pending<'a>(&self, candidates: impl IntoIterator<Item = &'a Address>) -> Vec<Address> {
        candidates
            .into_iter()
            .filter(|a| !self.entries.contains_key(a))
            .cloned()
            .collect()
    }

    pub fn mark_checking(&mut self, address: Address) {
        self.entries.insert(address, WalletEligibility::Checking);
    }

    pub fn settle(&mut self, address: Address, verdict: WalletEligibility) {
        self.entries.insert(address, verdict);
    }

    pub fn get(&self, address: &Address) -> Option<WalletEligibility> {
        self.entries.get(address).copied()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.entries.contains_key(address)
    }

    /// True if at least one wallet has settled to `Pass`
    pub fn any_pass(&self) -> bool {
        self.entries
            .values()
            .any(|v| *v == WalletEligibility::Pass)
    }

    pub fn passing(&self) -> Vec<Address> {
        let mut passing: Vec<Address> = self
            .entries
            .iter()
            .filter(|(_, v)| **v == WalletEligibility::Pass)
            .map(|(a, _)| a.clone())
            .collect();
        passing.sort();
        passing
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &WalletEligibility)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::new(format!("0x{:040x}", n))
    }

    #[test]
    fn test_pending_skips_existing_entries() {
        let mut map = EligibilityMap::new();
        map.settle(addr(1), WalletEligibility::Pass);
        map.mark_checking(addr(2));

        let candidates = [addr(1), addr(2), addr(3)];
        let pending = map.pending(candidates.iter());
        assert_eq!(pending, vec![addr(3)]);
    }

    #[test]
    fn test_any_pass() {
        let mut map = EligibilityMap::new();
        assert!(!map.any_pass());
        map.settle(addr(1), WalletEligibility::Fail);
        assert!(!map.any_pass());
        map.mark_checking(addr(2));
        assert!(!map.any_pass());
        map.settle(addr(2), WalletEligibility::Pass);
        assert!(map.any_pass());
    }

    #[test]
    fn test_settle_overwrites_checking() {
        let mut map = EligibilityMap::new();
        map.mark_checking(addr(1));
        assert_eq!(map.get(&addr(1)), Some(WalletEligibility::Checking));
        map.settle(addr(1), WalletEligibility::Fail);
        assert_eq!(map.get(&addr(1)), Some(WalletEligibility::Fail));
        assert_eq!(map.len(), 1);
    }
}
