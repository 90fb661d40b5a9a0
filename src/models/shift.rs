//! Shift definitions, assignments, and per-department roster records.

use serde::{Deserialize, Serialize};

use crate::models::staff::Staff;

/// Compound identity of a shift: label plus time range.
///
/// Two shifts sharing a label but not a time range are distinct. This key
/// is used uniformly for de-duplication, filtering, and cell merging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShiftKey {
    pub label: String,
    pub time: String,
}

impl ShiftKey {
    pub fn new(label: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            time: time.into(),
        }
    }

    /// Display form, e.g. `morning (08:00 - 12:00)`.
    pub fn display(&self) -> String {
        format!("{label} ({time})", label = self.label, time = self.time)
    }
}

/// Membership of one staff member in a shift for the month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    /// Normalized staff id (never an expanded object in local state).
    #[serde(rename = "userId")]
    pub staff_id: String,
    /// Optional free-text note attached to the membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A named, timed work block within a department for the month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShiftDef {
    pub label: String,
    pub time: String,
    #[serde(default)]
    pub users: Vec<Assignment>,
}

impl ShiftDef {
    pub fn key(&self) -> ShiftKey {
        ShiftKey::new(self.label.clone(), self.time.clone())
    }
}

/// One department's shift record for a month: ordered shift list plus the
/// waiting pool of unassigned staff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupRoster {
    pub department: String,
    pub shifts: Vec<ShiftDef>,
    #[serde(default)]
    pub waiting: Vec<String>,
}

/// Default shifts seeded when a department has no record for the month.
pub const DEFAULT_SHIFTS: &[(&str, &str)] = &[
    ("morning", "08:00 - 12:00"),
    ("afternoon", "13:30 - 17:30"),
    ("night", "18:00 - 22:00"),
];

impl GroupRoster {
    /// Build the default record for a department with no data this month:
    /// the three fixed shifts with empty assignment lists, and a waiting
    /// pool seeded with every directory member of that department.
    pub fn default_for(department: &str, directory: &[Staff]) -> Self {
        let shifts = DEFAULT_SHIFTS
            .iter()
            .map(|(label, time)| ShiftDef {
                label: (*label).to_string(),
                time: (*time).to_string(),
                users: Vec::new(),
            })
            .collect();

        let waiting = directory
            .iter()
            .filter(|s| s.department == department)
            .map(|s| s.id.clone())
            .collect();

        Self {
            department: department.to_string(),
            shifts,
            waiting,
        }
    }

    /// Assign a staff member to the shift at `shift_index`.
    ///
    /// A staff member holds at most one shift per department-month, so the
    /// id is first removed from every shift and from the waiting pool.
    /// Returns false if the index is out of range (no state is touched).
    pub fn assign(&mut self, staff_id: &str, shift_index: usize) -> bool {
        if shift_index >= self.shifts.len() {
            return false;
        }

        self.remove_everywhere(staff_id);
        self.shifts[shift_index].users.push(Assignment {
            staff_id: staff_id.to_string(),
            note: None,
        });
        true
    }

    /// Move a staff member out of any shift into the waiting pool.
    pub fn move_to_waiting(&mut self, staff_id: &str) {
        self.remove_everywhere(staff_id);
        self.waiting.push(staff_id.to_string());
    }

    /// Remove a staff member from every shift and the waiting pool.
    fn remove_everywhere(&mut self, staff_id: &str) {
        for shift in &mut self.shifts {
            shift.users.retain(|a| a.staff_id != staff_id);
        }
        self.waiting.retain(|id| id != staff_id);
    }

    /// True if the staff member is in a shift or the waiting pool.
    pub fn contains(&self, staff_id: &str) -> bool {
        self.waiting.iter().any(|id| id == staff_id)
            || self
                .shifts
                .iter()
                .any(|s| s.users.iter().any(|a| a.staff_id == staff_id))
    }

    /// Count of assigned staff across all shifts.
    pub fn assigned_count(&self) -> usize {
        self.shifts.iter().map(|s| s.users.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Vec<Staff> {
        vec![
            Staff {
                id: "u-1".to_string(),
                username: "an.ngo".to_string(),
                department: "customer-service".to_string(),
            },
            Staff {
                id: "u-2".to_string(),
                username: "binh.le".to_string(),
                department: "customer-service".to_string(),
            },
            Staff {
                id: "u-3".to_string(),
                username: "chi.pham".to_string(),
                department: "import-export".to_string(),
            },
        ]
    }

    #[test]
    fn test_default_record_has_three_empty_shifts() {
        let roster = GroupRoster::default_for("customer-service", &directory());

        assert_eq!(roster.shifts.len(), 3);
        assert_eq!(roster.shifts[0].label, "morning");
        assert_eq!(roster.shifts[1].label, "afternoon");
        assert_eq!(roster.shifts[2].label, "night");
        assert!(roster.shifts.iter().all(|s| s.users.is_empty()));
    }

    #[test]
    fn test_default_record_seeds_waiting_pool_once() {
        let roster = GroupRoster::default_for("customer-service", &directory());

        assert_eq!(roster.waiting, vec!["u-1".to_string(), "u-2".to_string()]);
        // Other departments' staff stay out
        assert!(!roster.waiting.contains(&"u-3".to_string()));
    }

    #[test]
    fn test_assign_removes_from_waiting() {
        let mut roster = GroupRoster::default_for("customer-service", &directory());

        assert!(roster.assign("u-1", 0));
        assert!(!roster.waiting.contains(&"u-1".to_string()));
        assert_eq!(roster.shifts[0].users.len(), 1);
    }

    #[test]
    fn test_assign_removes_from_other_shifts() {
        let mut roster = GroupRoster::default_for("customer-service", &directory());

        roster.assign("u-1", 0);
        roster.assign("u-1", 2);

        assert!(roster.shifts[0].users.is_empty());
        assert_eq!(roster.shifts[2].users.len(), 1);
        assert_eq!(roster.assigned_count(), 1);
    }

    #[test]
    fn test_assign_out_of_range_is_noop() {
        let mut roster = GroupRoster::default_for("customer-service", &directory());

        assert!(!roster.assign("u-1", 7));
        assert!(roster.waiting.contains(&"u-1".to_string()));
    }

    #[test]
    fn test_move_to_waiting_is_exclusive() {
        let mut roster = GroupRoster::default_for("customer-service", &directory());

        roster.assign("u-2", 1);
        roster.move_to_waiting("u-2");

        assert!(roster.shifts[1].users.is_empty());
        assert_eq!(roster.waiting.iter().filter(|id| *id == "u-2").count(), 1);
    }

    #[test]
    fn test_shift_key_distinguishes_times() {
        let a = ShiftKey::new("morning", "08:00 - 12:00");
        let b = ShiftKey::new("morning", "07:00 - 11:00");
        assert_ne!(a, b);
        assert_eq!(a.display(), "morning (08:00 - 12:00)");
    }
}
