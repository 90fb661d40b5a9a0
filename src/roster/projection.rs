//! Staff projection builder: flattens per-department shift records into the
//! ordered row list the roster grid, rowspan calculator, and exporter share.

use std::collections::BTreeMap;

use crate::models::shift::{GroupRoster, ShiftKey};
use crate::models::staff::Staff;

/// Explicit department precedence for the grid. Unrecognized departments
/// sort lexicographically after these; the team-lead department is always
/// last.
pub const DEPARTMENT_ORDER: &[&str] = &["customer-service", "import-export", "documentation", "accounting"];

/// Department forced to the bottom of every grouping.
pub const TEAM_LEAD_DEPARTMENT: &str = "team-lead";

/// One row of the projected roster: a staff member in a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub staff_id: String,
    pub display_name: String,
    pub department: String,
    pub shift: ShiftKey,
    pub note: Option<String>,
}

impl RosterRow {
    /// Merge key for the shift-label column.
    pub fn shift_merge_key(&self) -> (&str, &str) {
        (&self.shift.label, &self.shift.time)
    }

    /// Merge key for the department column. Department cells only merge
    /// within a run already merged at the shift level.
    pub fn department_merge_key(&self) -> (&str, &str, &str) {
        (&self.department, &self.shift.label, &self.shift.time)
    }
}

/// Rank of a shift label in the fixed precedence order.
fn shift_rank(label: &str) -> u8 {
    match label.to_lowercase().as_str() {
        "morning" => 0,
        "afternoon" => 1,
        "night" => 2,
        _ => 3,
    }
}

/// Total-order sort key for departments: the explicit precedence list
/// first, then unknown departments lexicographically, then team-lead.
fn department_rank(department: &str) -> (u8, usize, &str) {
    if department == TEAM_LEAD_DEPARTMENT {
        return (2, 0, "");
    }
    match DEPARTMENT_ORDER.iter().position(|d| *d == department) {
        Some(index) => (0, index, ""),
        None => (1, 0, department),
    }
}

/// Flatten the assignment map into a sorted row list.
///
/// Assignments whose staff reference cannot be resolved against the
/// directory are dropped and logged; stale references are expected after
/// staff deletion and are not an error.
pub fn build_projection(groups: &BTreeMap<String, GroupRoster>, directory: &[Staff]) -> Vec<RosterRow> {
    let mut rows = Vec::new();

    for roster in groups.values() {
        for shift in &roster.shifts {
            for assignment in &shift.users {
                let Some(staff) = Staff::find(directory, &assignment.staff_id) else {
                    tracing::warn!(
                        "Dropping dangling staff reference '{}' in {} / {}",
                        assignment.staff_id,
                        roster.department,
                        shift.label
                    );
                    continue;
                };

                rows.push(RosterRow {
                    staff_id: staff.id.clone(),
                    display_name: staff.username.clone(),
                    department: roster.department.clone(),
                    shift: shift.key(),
                    note: assignment.note.clone(),
                });
            }
        }
    }

    rows.sort_by(|a, b| {
        (shift_rank(&a.shift.label), a.shift.label.to_lowercase(), &a.shift.time)
            .cmp(&(shift_rank(&b.shift.label), b.shift.label.to_lowercase(), &b.shift.time))
            .then_with(|| department_rank(&a.department).cmp(&department_rank(&b.department)))
            .then_with(|| a.display_name.cmp(&b.display_name))
            .then_with(|| a.staff_id.cmp(&b.staff_id))
    });

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shift::{Assignment, ShiftDef};

    fn staff(id: &str, name: &str, dept: &str) -> Staff {
        Staff {
            id: id.to_string(),
            username: name.to_string(),
            department: dept.to_string(),
        }
    }

    fn shift(label: &str, time: &str, ids: &[&str]) -> ShiftDef {
        ShiftDef {
            label: label.to_string(),
            time: time.to_string(),
            users: ids
                .iter()
                .map(|id| Assignment {
                    staff_id: (*id).to_string(),
                    note: None,
                })
                .collect(),
        }
    }

    fn group(dept: &str, shifts: Vec<ShiftDef>) -> (String, GroupRoster) {
        (
            dept.to_string(),
            GroupRoster {
                department: dept.to_string(),
                shifts,
                waiting: Vec::new(),
            },
        )
    }

    fn sample() -> (BTreeMap<String, GroupRoster>, Vec<Staff>) {
        let directory = vec![
            staff("u-1", "an.ngo", "customer-service"),
            staff("u-2", "binh.le", "customer-service"),
            staff("u-3", "chi.pham", "import-export"),
            staff("u-4", "dung.vo", "team-lead"),
            staff("u-5", "em.ha", "warehouse"),
        ];

        let groups: BTreeMap<_, _> = [
            group(
                "customer-service",
                vec![shift("morning", "08:00 - 12:00", &["u-2", "u-1"]), shift("night", "18:00 - 22:00", &["u-1"])],
            ),
            group("import-export", vec![shift("morning", "08:00 - 12:00", &["u-3"])]),
            group("team-lead", vec![shift("morning", "08:00 - 12:00", &["u-4"])]),
            group("warehouse", vec![shift("morning", "08:00 - 12:00", &["u-5"])]),
        ]
        .into_iter()
        .collect();

        (groups, directory)
    }

    #[test]
    fn test_shift_precedence_first() {
        let (groups, directory) = sample();
        let rows = build_projection(&groups, &directory);

        // u-1 appears once for morning and once for night; night sorts last
        assert_eq!(rows.last().unwrap().shift.label, "night");
        assert!(rows.iter().take(rows.len() - 1).all(|r| r.shift.label == "morning"));
    }

    #[test]
    fn test_department_precedence_with_team_lead_last() {
        let (groups, directory) = sample();
        let rows = build_projection(&groups, &directory);

        let morning_depts: Vec<&str> = rows
            .iter()
            .filter(|r| r.shift.label == "morning")
            .map(|r| r.department.as_str())
            .collect();

        // Explicit list first, unknown ("warehouse") next, team-lead last
        assert_eq!(
            morning_depts,
            vec!["customer-service", "customer-service", "import-export", "warehouse", "team-lead"]
        );
    }

    #[test]
    fn test_names_sorted_within_department() {
        let (groups, directory) = sample();
        let rows = build_projection(&groups, &directory);

        assert_eq!(rows[0].display_name, "an.ngo");
        assert_eq!(rows[1].display_name, "binh.le");
    }

    #[test]
    fn test_output_independent_of_input_order() {
        let (groups, directory) = sample();
        let expected = build_projection(&groups, &directory);

        // Reverse the per-shift user lists and re-project
        let mut shuffled = groups.clone();
        for roster in shuffled.values_mut() {
            for shift in &mut roster.shifts {
                shift.users.reverse();
            }
            roster.shifts.reverse();
        }

        assert_eq!(build_projection(&shuffled, &directory), expected);
    }

    #[test]
    fn test_label_tie_broken_by_time() {
        let directory = vec![staff("u-1", "an.ngo", "customer-service"), staff("u-2", "binh.le", "customer-service")];
        let groups: BTreeMap<_, _> = [group(
            "customer-service",
            vec![shift("morning", "09:00 - 13:00", &["u-1"]), shift("morning", "08:00 - 12:00", &["u-2"])],
        )]
        .into_iter()
        .collect();

        let rows = build_projection(&groups, &directory);
        assert_eq!(rows[0].shift.time, "08:00 - 12:00");
        assert_eq!(rows[1].shift.time, "09:00 - 13:00");
    }

    #[test]
    fn test_dangling_reference_dropped() {
        let directory = vec![staff("u-1", "an.ngo", "customer-service")];
        let groups: BTreeMap<_, _> = [group(
            "customer-service",
            vec![shift("morning", "08:00 - 12:00", &["u-1", "u-gone"])],
        )]
        .into_iter()
        .collect();

        let rows = build_projection(&groups, &directory);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].staff_id, "u-1");
    }

    #[test]
    fn test_unrecognized_shift_sorts_after_night() {
        let directory = vec![staff("u-1", "an.ngo", "customer-service"), staff("u-2", "binh.le", "customer-service")];
        let groups: BTreeMap<_, _> = [group(
            "customer-service",
            vec![shift("overnight audit", "22:00 - 06:00", &["u-1"]), shift("night", "18:00 - 22:00", &["u-2"])],
        )]
        .into_iter()
        .collect();

        let rows = build_projection(&groups, &directory);
        assert_eq!(rows[0].shift.label, "night");
        assert_eq!(rows[1].shift.label, "overnight audit");
    }
}
