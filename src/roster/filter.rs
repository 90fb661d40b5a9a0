//! Multi-select filtering over the projected row list.

use std::collections::BTreeSet;

use crate::models::shift::ShiftKey;
use crate::roster::projection::RosterRow;

/// Optional multi-select criteria over the projection.
///
/// Each criterion passes when its set is empty or contains the row's
/// field; criteria combine with logical AND. Applying the filter never
/// mutates the input and is idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    pub shifts: BTreeSet<ShiftKey>,
    pub departments: BTreeSet<String>,
}

impl RosterFilter {
    /// True when no criterion is active (apply is the identity).
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty() && self.departments.is_empty()
    }

    /// Clear all criteria.
    pub fn clear(&mut self) {
        self.shifts.clear();
        self.departments.clear();
    }

    /// Toggle a shift key in or out of the criteria set.
    pub fn toggle_shift(&mut self, key: &ShiftKey) {
        if !self.shifts.remove(key) {
            self.shifts.insert(key.clone());
        }
    }

    /// Toggle a department in or out of the criteria set.
    pub fn toggle_department(&mut self, department: &str) {
        if !self.departments.remove(department) {
            self.departments.insert(department.to_string());
        }
    }

    /// True if the row passes every active criterion.
    pub fn matches(&self, row: &RosterRow) -> bool {
        let shift_ok = self.shifts.is_empty() || self.shifts.contains(&row.shift);
        let dept_ok = self.departments.is_empty() || self.departments.contains(&row.department);
        shift_ok && dept_ok
    }

    /// Return the matching subsequence of `rows`, in order.
    pub fn apply(&self, rows: &[RosterRow]) -> Vec<RosterRow> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, dept: &str, label: &str, time: &str) -> RosterRow {
        RosterRow {
            staff_id: name.to_string(),
            display_name: name.to_string(),
            department: dept.to_string(),
            shift: ShiftKey::new(label, time),
            note: None,
        }
    }

    fn rows() -> Vec<RosterRow> {
        vec![
            row("an.ngo", "customer-service", "morning", "08:00 - 12:00"),
            row("binh.le", "customer-service", "night", "18:00 - 22:00"),
            row("chi.pham", "import-export", "morning", "08:00 - 12:00"),
        ]
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let rows = rows();
        let filter = RosterFilter::default();

        assert_eq!(filter.apply(&rows), rows);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let rows = rows();
        let mut filter = RosterFilter::default();
        filter.toggle_shift(&ShiftKey::new("morning", "08:00 - 12:00"));
        filter.toggle_department("import-export");

        let out = filter.apply(&rows);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].display_name, "chi.pham");
    }

    #[test]
    fn test_multi_select_within_criterion() {
        let rows = rows();
        let mut filter = RosterFilter::default();
        filter.toggle_department("customer-service");
        filter.toggle_department("import-export");

        assert_eq!(filter.apply(&rows).len(), 3);
    }

    #[test]
    fn test_idempotent() {
        let rows = rows();
        let mut filter = RosterFilter::default();
        filter.toggle_shift(&ShiftKey::new("morning", "08:00 - 12:00"));

        let once = filter.apply(&rows);
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_does_not_mutate_input() {
        let rows = rows();
        let before = rows.clone();
        let mut filter = RosterFilter::default();
        filter.toggle_department("import-export");

        let _ = filter.apply(&rows);
        assert_eq!(rows, before);
    }

    #[test]
    fn test_shift_key_filter_distinguishes_times() {
        let mut rows = rows();
        rows.push(row("dung.vo", "customer-service", "morning", "07:00 - 11:00"));

        let mut filter = RosterFilter::default();
        filter.toggle_shift(&ShiftKey::new("morning", "08:00 - 12:00"));

        let out = filter.apply(&rows);
        assert!(out.iter().all(|r| r.shift.time == "08:00 - 12:00"));
    }

    #[test]
    fn test_toggle_removes_on_second_call() {
        let mut filter = RosterFilter::default();
        filter.toggle_department("customer-service");
        filter.toggle_department("customer-service");
        assert!(filter.is_empty());
    }
}
