//! Prior-value ledger for optimistic writes.
//!
//! Every optimistic mutation follows the same shape: apply locally, record
//! the prior value here, issue the backend call, then settle. Failure of
//! one key's write never touches any other key's pending or settled state;
//! overlapping writes to the same key are last-write-wins.

use std::collections::HashMap;
use std::hash::Hash;

/// Pending optimistic writes keyed by cell coordinate, each holding the
/// value to reinstate on failure.
#[derive(Debug)]
pub struct PendingWrites<K, V> {
    pending: HashMap<K, (u64, V)>,
    next_ticket: u64,
}

impl<K: Eq + Hash, V> Default for PendingWrites<K, V> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
            next_ticket: 0,
        }
    }
}

impl<K: Eq + Hash, V> PendingWrites<K, V> {
    /// Record a write that was just applied locally, keeping `prior` for
    /// rollback. A newer write to the same key takes ownership of the key;
    /// the superseded write's settlement is then ignored.
    pub fn begin(&mut self, key: K, prior: V) -> u64 {
        self.next_ticket += 1;
        self.pending.insert(key, (self.next_ticket, prior));
        self.next_ticket
    }

    /// Settle a successful write. The optimistic value is already correct,
    /// so the prior value is simply dropped.
    pub fn commit(&mut self, key: &K, ticket: u64) {
        if self.pending.get(key).is_some_and(|(owner, _)| *owner == ticket) {
            self.pending.remove(key);
        }
    }

    /// Settle a failed write, returning the prior value to reinstate.
    /// Returns None when a newer write owns the key.
    pub fn rollback(&mut self, key: &K, ticket: u64) -> Option<V> {
        if self.pending.get(key).is_some_and(|(owner, _)| *owner == ticket) {
            return self.pending.remove(key).map(|(_, prior)| prior);
        }
        None
    }

    /// Number of unsettled writes.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True if no write is awaiting settlement.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::{DayStatus, StatusMap, get_status, set_status};

    #[test]
    fn test_rollback_restores_prior() {
        let mut pending: PendingWrites<(String, u32), Option<DayStatus>> = PendingWrites::default();
        let mut map = StatusMap::new();
        set_status(&mut map, "u-1", 5, Some(DayStatus::OnLeave));

        // Optimistic edit: leave -> off
        let prior = set_status(&mut map, "u-1", 5, Some(DayStatus::FullDayOff));
        let ticket = pending.begin(("u-1".to_string(), 5), prior);

        // Backend rejects the write
        let restore = pending.rollback(&("u-1".to_string(), 5), ticket).unwrap();
        set_status(&mut map, "u-1", 5, restore);

        assert_eq!(get_status(&map, "u-1", 5), Some(&DayStatus::OnLeave));
    }

    #[test]
    fn test_rollback_of_first_write_restores_empty_cell() {
        let mut pending: PendingWrites<(String, u32), Option<DayStatus>> = PendingWrites::default();
        let mut map = StatusMap::new();

        let prior = set_status(&mut map, "u-1", 5, Some(DayStatus::HalfDayOff));
        let ticket = pending.begin(("u-1".to_string(), 5), prior);

        let restore = pending.rollback(&("u-1".to_string(), 5), ticket).unwrap();
        set_status(&mut map, "u-1", 5, restore);

        assert!(map.is_empty());
    }

    #[test]
    fn test_commit_drops_prior() {
        let mut pending: PendingWrites<(String, u32), Option<DayStatus>> = PendingWrites::default();

        let ticket = pending.begin(("u-1".to_string(), 5), None);
        pending.commit(&("u-1".to_string(), 5), ticket);

        assert!(pending.is_empty());
        assert_eq!(pending.rollback(&("u-1".to_string(), 5), ticket), None);
    }

    #[test]
    fn test_cells_settle_independently() {
        let mut pending: PendingWrites<(String, u32), Option<DayStatus>> = PendingWrites::default();

        let t1 = pending.begin(("u-1".to_string(), 5), Some(DayStatus::OnLeave));
        let t2 = pending.begin(("u-2".to_string(), 9), None);

        // u-2 fails; u-1 is untouched
        assert!(pending.rollback(&("u-2".to_string(), 9), t2).is_some());
        assert_eq!(pending.len(), 1);
        pending.commit(&("u-1".to_string(), 5), t1);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_newer_write_owns_the_key() {
        let mut pending: PendingWrites<(String, u32), Option<DayStatus>> = PendingWrites::default();
        let key = ("u-1".to_string(), 5);

        let t1 = pending.begin(key.clone(), Some(DayStatus::OnLeave));
        let t2 = pending.begin(key.clone(), Some(DayStatus::FullDayOff));

        // Stale settlement of the superseded write is ignored
        assert_eq!(pending.rollback(&key, t1), None);
        assert_eq!(pending.len(), 1);

        // The owning write settles normally
        assert_eq!(pending.rollback(&key, t2), Some(Some(DayStatus::FullDayOff)));
    }
}
