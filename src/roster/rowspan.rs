//! Rowspan computation for the merged shift and department columns.

use crate::roster::projection::RosterRow;

/// Vertical cell-merge spans for the two mergeable columns, parallel to
/// the filtered row list.
///
/// Entry `i` holds the length of the run of equal merge keys starting at
/// `i` if a cell renders there, and 0 for rows absorbed into a previous
/// merge. Recomputed whenever the filtered list changes; pure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSpans {
    pub shift: Vec<usize>,
    pub department: Vec<usize>,
}

impl RowSpans {
    /// Compute both span arrays for the (filtered) ordered row list.
    pub fn compute(rows: &[RosterRow]) -> Self {
        Self {
            shift: spans_by(rows, |r| r.shift_merge_key()),
            department: spans_by(rows, |r| r.department_merge_key()),
        }
    }

    /// True if row `i` renders a cell in the shift-label column.
    pub fn renders_shift_cell(&self, i: usize) -> bool {
        self.shift.get(i).is_some_and(|span| *span > 0)
    }

    /// True if row `i` renders a cell in the department column.
    pub fn renders_department_cell(&self, i: usize) -> bool {
        self.department.get(i).is_some_and(|span| *span > 0)
    }
}

/// Run-length spans over `rows` under the given merge key: run starts get
/// the run length, absorbed rows get 0.
fn spans_by<'a, K: PartialEq>(rows: &'a [RosterRow], key: impl Fn(&'a RosterRow) -> K) -> Vec<usize> {
    let mut spans = vec![0; rows.len()];
    let mut start = 0;

    for i in 1..=rows.len() {
        if i == rows.len() || key(&rows[i]) != key(&rows[start]) {
            spans[start] = i - start;
            start = i;
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shift::ShiftKey;

    fn row(name: &str, dept: &str, label: &str, time: &str) -> RosterRow {
        RosterRow {
            staff_id: name.to_string(),
            display_name: name.to_string(),
            department: dept.to_string(),
            shift: ShiftKey::new(label, time),
            note: None,
        }
    }

    fn sample() -> Vec<RosterRow> {
        vec![
            row("a", "customer-service", "morning", "08:00 - 12:00"),
            row("b", "customer-service", "morning", "08:00 - 12:00"),
            row("c", "import-export", "morning", "08:00 - 12:00"),
            row("d", "import-export", "night", "18:00 - 22:00"),
        ]
    }

    #[test]
    fn test_shift_spans() {
        let spans = RowSpans::compute(&sample());
        assert_eq!(spans.shift, vec![3, 0, 0, 1]);
    }

    #[test]
    fn test_department_merges_only_within_shift_run() {
        let spans = RowSpans::compute(&sample());
        assert_eq!(spans.department, vec![2, 0, 1, 1]);
    }

    #[test]
    fn test_render_predicate_true_only_at_run_start() {
        let spans = RowSpans::compute(&sample());

        assert!(spans.renders_shift_cell(0));
        assert!(!spans.renders_shift_cell(1));
        assert!(!spans.renders_shift_cell(2));
        assert!(spans.renders_shift_cell(3));

        assert!(spans.renders_department_cell(0));
        assert!(!spans.renders_department_cell(1));
        assert!(spans.renders_department_cell(2));
        assert!(spans.renders_department_cell(3));
    }

    #[test]
    fn test_span_sum_equals_row_count() {
        let rows = sample();
        let spans = RowSpans::compute(&rows);

        assert_eq!(spans.shift.iter().sum::<usize>(), rows.len());
        assert_eq!(spans.department.iter().sum::<usize>(), rows.len());
    }

    #[test]
    fn test_same_label_different_time_does_not_merge() {
        let rows = vec![
            row("a", "customer-service", "morning", "08:00 - 12:00"),
            row("b", "customer-service", "morning", "07:00 - 11:00"),
        ];
        let spans = RowSpans::compute(&rows);
        assert_eq!(spans.shift, vec![1, 1]);
    }

    #[test]
    fn test_empty_list() {
        let spans = RowSpans::compute(&[]);
        assert!(spans.shift.is_empty());
        assert!(spans.department.is_empty());
        assert!(!spans.renders_shift_cell(0));
    }
}
