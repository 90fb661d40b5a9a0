//! Monthly roster grid: filters, merged shift/department cells, the
//! per-day status editor, note indicators, and Excel export.

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CARET_LEFT, CARET_RIGHT, FILE_XLS, FLOPPY_DISK};

use super::app::{App, CellEditor};
use super::components::{back_button, colors, panel_header, status_cell_color, styled_button, styled_button_with_icon};
use crate::export::days_in_month;
use crate::models::note::get_note;
use crate::models::shift::ShiftKey;
use crate::models::status::get_status;

/// Show the roster panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Monthly Roster");

    // Dismissible inline warning (stale data, fallback loads, empty export)
    if let Some(warning) = app.warning_message.clone() {
        ui.horizontal(|ui| {
            ui.colored_label(colors::WARNING, warning);
            if ui.small_button("Dismiss").clicked() {
                app.warning_message = None;
            }
        });
        ui.add_space(5.0);
    }

    show_toolbar(app, ui);
    ui.add_space(10.0);
    show_filters(app, ui);

    ui.add_space(15.0);
    ui.separator();
    ui.add_space(10.0);

    show_grid(app, ui);

    go_back
}

/// Month navigation, snapshot banner, refresh and export controls.
fn show_toolbar(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if app.is_snapshot_view() {
            let name = app.roster.snapshot_name.clone().unwrap_or_default();
            ui.label(RichText::new(format!("Snapshot: {name}")).strong());
            ui.label(format!("({month}/{year})", month = app.roster.month, year = app.roster.year));

            ui.add_space(10.0);

            let save_label = if app.snapshot_dirty { "Save Snapshot *" } else { "Save Snapshot" };
            if styled_button_with_icon(ui, FLOPPY_DISK, save_label).clicked() {
                app.save_snapshot();
            }
            if styled_button(ui, "Back to Live Month").clicked() {
                app.open_live();
            }
        } else {
            if ui.button(CARET_LEFT).on_hover_text("Previous month").clicked() {
                app.shift_month(-1);
            }
            ui.label(
                RichText::new(format!("{month}/{year}", month = app.month, year = app.year))
                    .size(16.0)
                    .strong(),
            );
            if ui.button(CARET_RIGHT).on_hover_text("Next month").clicked() {
                app.shift_month(1);
            }
        }

        ui.add_space(20.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_roster();
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
            app.export_roster();
        }

        if app.is_loading {
            ui.add_space(10.0);
            ui.spinner();
        }
    });
}

/// Multi-select filters over shifts and departments.
fn show_filters(app: &mut App, ui: &mut Ui) {
    // Option lists come from the unfiltered projection so deselected
    // values stay visible
    let mut shift_keys: Vec<ShiftKey> = app.projection.iter().map(|r| r.shift.clone()).collect();
    shift_keys.sort();
    shift_keys.dedup();

    let mut departments: Vec<String> = app.projection.iter().map(|r| r.department.clone()).collect();
    departments.sort();
    departments.dedup();

    let mut filter_changed = false;

    ui.horizontal(|ui| {
        ui.label("Shifts:");
        let selected = if app.filter.shifts.is_empty() {
            "All".to_string()
        } else {
            format!("{} selected", app.filter.shifts.len())
        };
        ui.menu_button(selected, |ui| {
            for key in &shift_keys {
                let active = app.filter.shifts.contains(key);
                if ui.selectable_label(active, key.display()).clicked() {
                    app.filter.toggle_shift(key);
                    filter_changed = true;
                }
            }
        });

        ui.add_space(20.0);

        ui.label("Departments:");
        let selected = if app.filter.departments.is_empty() {
            "All".to_string()
        } else {
            format!("{} selected", app.filter.departments.len())
        };
        ui.menu_button(selected, |ui| {
            for department in &departments {
                let active = app.filter.departments.contains(department);
                if ui.selectable_label(active, department).clicked() {
                    app.filter.toggle_department(department);
                    filter_changed = true;
                }
            }
        });

        if !app.filter.is_empty() {
            ui.add_space(10.0);
            if styled_button(ui, "Clear").clicked() {
                app.filter.clear();
                filter_changed = true;
            }
        }

        ui.add_space(20.0);
        ui.label(format!(
            "Showing {shown} of {total} rows",
            shown = app.filtered.len(),
            total = app.projection.len()
        ));
    });

    if filter_changed {
        app.apply_filter();
    }
}

/// The day grid itself. Shift and department cells render only at the
/// start of their merged run; day cells open the cell editor on click.
fn show_grid(app: &mut App, ui: &mut Ui) {
    let days = days_in_month(app.roster.month, app.roster.year);
    let mut open_editor: Option<(usize, u32)> = None;

    ScrollArea::both().id_salt("roster_scroll").show(ui, |ui| {
        egui::Grid::new("roster_grid")
            .striped(true)
            .min_col_width(28.0)
            .spacing([6.0, 4.0])
            .show(ui, |ui| {
                // Header
                ui.strong("Shift");
                ui.strong("Department");
                ui.strong("Name");
                for day in 1..=days {
                    ui.strong(day.to_string());
                }
                ui.end_row();

                for (idx, row) in app.filtered.iter().enumerate() {
                    // Merged columns: text at run start, blank in absorbed rows
                    if app.spans.renders_shift_cell(idx) {
                        ui.label(row.shift.display());
                    } else {
                        ui.label("");
                    }
                    if app.spans.renders_department_cell(idx) {
                        ui.label(&row.department);
                    } else {
                        ui.label("");
                    }
                    ui.label(&row.display_name);

                    for day in 1..=days {
                        let status = get_status(&app.roster.statuses, &row.staff_id, day);
                        let note = get_note(&app.roster.notes, &row.staff_id, day);

                        let (text, fill) = match status {
                            Some(s) => (s.code().to_string(), status_cell_color(s)),
                            None => (String::new(), Color32::TRANSPARENT),
                        };
                        let label = if note.is_some() { format!("{text}*") } else { text };

                        let mut response = ui.add(
                            egui::Button::new(RichText::new(label).small())
                                .fill(fill)
                                .min_size(egui::vec2(28.0, 18.0)),
                        );
                        if let Some(text) = note {
                            response = response.on_hover_text(text);
                        }
                        if response.clicked() {
                            open_editor = Some((idx, day));
                        }
                    }
                    ui.end_row();
                }

                if app.filtered.is_empty() {
                    ui.label("No roster rows. Assign staff on the board or clear filters.");
                    ui.end_row();
                }
            });
    });

    if let Some((idx, day)) = open_editor {
        let row = app.filtered[idx].clone();
        let status = get_status(&app.roster.statuses, &row.staff_id, day);
        let note = get_note(&app.roster.notes, &row.staff_id, day);
        app.cell_editor = CellEditor::open(&row, day, status, note);
    }
}
