//! Excel export functionality.

use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Note, Workbook, XlsxError};
use std::path::{Path, PathBuf};

use crate::models::note::{NoteMap, get_note};
use crate::models::status::{StatusMap, get_status};
use crate::roster::projection::RosterRow;
use crate::roster::rowspan::RowSpans;

/// Number of days in a month.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default();
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.map(|n| n.signed_duration_since(first).num_days() as u32).unwrap_or(30)
}

/// Export the filtered roster grid to an Excel file.
///
/// One row per staff member in the given order, four leading descriptive
/// columns with the shift and department cells merged across their
/// contiguous runs, then one color-coded status column per day of the
/// month with notes attached as cell annotations.
///
/// Returns `Ok(false)` without touching the filesystem when the row list
/// is empty; the caller surfaces that as a warning, not an error.
pub fn export_roster_to_excel(
    rows: &[RosterRow],
    month: u32,
    year: i32,
    statuses: &StatusMap,
    notes: &NoteMap,
    path: &Path,
) -> Result<bool, XlsxError> {
    if rows.is_empty() {
        return Ok(false);
    }

    let days = days_in_month(month, year);
    let spans = RowSpans::compute(rows);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name(format!("Roster {month}-{year}"))?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    // Merged descriptive cells are centered vertically across their run
    let merged_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let text_format = Format::new().set_border(FormatBorder::Thin);

    // Headers
    worksheet.write_string_with_format(0, 0, "No.", &header_format)?;
    worksheet.write_string_with_format(0, 1, "Shift", &header_format)?;
    worksheet.write_string_with_format(0, 2, "Department", &header_format)?;
    worksheet.write_string_with_format(0, 3, "Name", &header_format)?;
    for day in 1..=days {
        worksheet.write_string_with_format(0, 3 + day as u16, day.to_string(), &header_format)?;
    }

    // Column widths
    worksheet.set_column_width(0, 5)?; // No.
    worksheet.set_column_width(1, 24)?; // Shift
    worksheet.set_column_width(2, 18)?; // Department
    worksheet.set_column_width(3, 24)?; // Name
    for day in 1..=days {
        worksheet.set_column_width(3 + day as u16, 6)?;
    }

    // Data rows
    for (idx, record) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_number_with_format(row, 0, (idx + 1) as f64, &text_format)?;

        // Shift column, merged across its contiguous run
        if spans.renders_shift_cell(idx) {
            let span = spans.shift[idx] as u32;
            let label = record.shift.display();
            if span > 1 {
                worksheet.merge_range(row, 1, row + span - 1, 1, &label, &merged_format)?;
            } else {
                worksheet.write_string_with_format(row, 1, &label, &merged_format)?;
            }
        }

        // Department column merges only within an already-merged shift run
        if spans.renders_department_cell(idx) {
            let span = spans.department[idx] as u32;
            if span > 1 {
                worksheet.merge_range(row, 2, row + span - 1, 2, &record.department, &merged_format)?;
            } else {
                worksheet.write_string_with_format(row, 2, &record.department, &merged_format)?;
            }
        }

        worksheet.write_string_with_format(row, 3, &record.display_name, &text_format)?;

        // One status cell per day, color-coded by the fixed table
        for day in 1..=days {
            let col = 3 + day as u16;
            match get_status(statuses, &record.staff_id, day) {
                Some(status) => {
                    let format = Format::new()
                        .set_border(FormatBorder::Thin)
                        .set_align(FormatAlign::Center)
                        .set_background_color(Color::RGB(status.color_rgb()));
                    worksheet.write_string_with_format(row, col, status.code(), &format)?;
                }
                None => {
                    worksheet.write_blank(row, col, &text_format)?;
                }
            }

            // Notes ride along as annotations, not inline text
            if let Some(text) = get_note(notes, &record.staff_id, day) {
                worksheet.insert_note(row, col, &Note::new(text))?;
            }
        }
    }

    // Freeze the header row and the descriptive columns
    worksheet.set_freeze_panes(1, 4)?;

    workbook.save(path)?;
    Ok(true)
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"])
        .save_file()
}

/// Generate default filename for a month's roster export.
pub fn generate_export_filename(month: u32, year: i32) -> String {
    format!("roster_{month}_{year}.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shift::ShiftKey;
    use crate::models::status::{DayStatus, set_status};

    fn row(name: &str, dept: &str, label: &str, time: &str) -> RosterRow {
        RosterRow {
            staff_id: name.to_string(),
            display_name: name.to_string(),
            department: dept.to_string(),
            shift: ShiftKey::new(label, time),
            note: None,
        }
    }

    #[test]
    fn test_empty_rows_write_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster_7_2025.xlsx");

        let written =
            export_roster_to_excel(&[], 7, 2025, &StatusMap::new(), &NoteMap::new(), &path).unwrap();

        assert!(!written);
        assert!(!path.exists());
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster_7_2025.xlsx");

        let rows = vec![
            row("an.ngo", "customer-service", "morning", "08:00 - 12:00"),
            row("binh.le", "customer-service", "morning", "08:00 - 12:00"),
            row("chi.pham", "import-export", "night", "18:00 - 22:00"),
        ];
        let mut statuses = StatusMap::new();
        set_status(&mut statuses, "an.ngo", 3, Some(DayStatus::FullDayOff));
        let mut notes = NoteMap::new();
        crate::models::note::set_note(&mut notes, "an.ngo", 3, "approved by lead");

        let written = export_roster_to_excel(&rows, 7, 2025, &statuses, &notes, &path).unwrap();

        assert!(written);
        assert!(path.exists());
    }

    #[test]
    fn test_filename_pattern() {
        assert_eq!(generate_export_filename(7, 2025), "roster_7_2025.xlsx");
        assert_eq!(generate_export_filename(12, 2024), "roster_12_2024.xlsx");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(7, 2025), 31);
        assert_eq!(days_in_month(2, 2024), 29);
        assert_eq!(days_in_month(2, 2025), 28);
        assert_eq!(days_in_month(12, 2025), 31);
    }
}
