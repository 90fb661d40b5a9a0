//! Shift-assignment board: per-department shift lists and the waiting
//! pool, with move operations that keep membership exclusive.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, FLOPPY_DISK, USERS};

use super::app::App;
use super::components::{back_button, panel_header, styled_button_with_icon};
use crate::models::staff::Staff;

/// A move requested from the board, applied after rendering.
enum BoardAction {
    Assign { staff_id: String, shift_index: usize },
    ToWaiting { staff_id: String },
}

/// Show the assignment board panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Assignment Board");

    // Department picker and refresh
    let departments: Vec<String> = app.roster.groups.keys().cloned().collect();
    if app.board_department.is_none() {
        app.board_department = departments.first().cloned();
    }

    ui.horizontal(|ui| {
        ui.label("Department:");
        egui::ComboBox::from_id_salt("board_dept")
            .width(200.0)
            .selected_text(app.board_department.as_deref().unwrap_or("-"))
            .show_ui(ui, |ui| {
                for department in &departments {
                    if ui
                        .selectable_label(app.board_department.as_deref() == Some(department), department)
                        .clicked()
                    {
                        app.board_department = Some(department.clone());
                    }
                }
            });

        ui.add_space(20.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_roster();
        }

        if app.is_snapshot_view() {
            ui.add_space(10.0);
            let save_label = if app.snapshot_dirty { "Save Snapshot *" } else { "Save Snapshot" };
            if styled_button_with_icon(ui, FLOPPY_DISK, save_label).clicked() {
                app.save_snapshot();
            }
        }
    });

    ui.add_space(15.0);
    ui.separator();
    ui.add_space(10.0);

    let Some(department) = app.board_department.clone() else {
        ui.label("No departments loaded yet.");
        return go_back;
    };
    let Some(group) = app.roster.groups.get(&department) else {
        ui.label(format!("Department '{department}' has no shift record for this month."));
        return go_back;
    };

    // Render the shift columns and waiting pool, collecting moves
    let mut action: Option<BoardAction> = None;
    let shift_labels: Vec<String> = group.shifts.iter().map(|s| s.key().display()).collect();

    ScrollArea::vertical().id_salt("board_scroll").show(ui, |ui| {
        for (shift_index, shift) in group.shifts.iter().enumerate() {
            ui.group(|ui| {
                ui.label(RichText::new(shift.key().display()).strong());
                ui.add_space(5.0);

                if shift.users.is_empty() {
                    ui.label(RichText::new("No staff assigned").weak());
                }

                for assignment in &shift.users {
                    // Dangling references render nothing; projection
                    // already logged them
                    let Some(staff) = Staff::find(&app.directory, &assignment.staff_id) else {
                        continue;
                    };

                    ui.horizontal(|ui| {
                        ui.label(&staff.username);
                        if let Some(note) = &assignment.note {
                            ui.label(RichText::new(note).small().weak());
                        }

                        ui.menu_button("Move", |ui| {
                            for (other_index, label) in shift_labels.iter().enumerate() {
                                if other_index != shift_index && ui.button(format!("To {label}")).clicked() {
                                    action = Some(BoardAction::Assign {
                                        staff_id: staff.id.clone(),
                                        shift_index: other_index,
                                    });
                                    ui.close();
                                }
                            }
                            if ui.button("To waiting pool").clicked() {
                                action = Some(BoardAction::ToWaiting {
                                    staff_id: staff.id.clone(),
                                });
                                ui.close();
                            }
                        });
                    });
                }
            });
            ui.add_space(10.0);
        }

        // Waiting pool
        ui.group(|ui| {
            ui.label(RichText::new(format!("{USERS} Waiting pool")).strong());
            ui.add_space(5.0);

            if group.waiting.is_empty() {
                ui.label(RichText::new("Everyone is assigned").weak());
            }

            for staff_id in &group.waiting {
                let Some(staff) = Staff::find(&app.directory, staff_id) else {
                    continue;
                };

                ui.horizontal(|ui| {
                    ui.label(&staff.username);
                    ui.menu_button("Assign", |ui| {
                        for (shift_index, label) in shift_labels.iter().enumerate() {
                            if ui.button(format!("To {label}")).clicked() {
                                action = Some(BoardAction::Assign {
                                    staff_id: staff.id.clone(),
                                    shift_index,
                                });
                                ui.close();
                            }
                        }
                    });
                });
            }
        });
    });

    match action {
        Some(BoardAction::Assign { staff_id, shift_index }) => {
            app.assign_staff(&department, &staff_id, shift_index);
        }
        Some(BoardAction::ToWaiting { staff_id }) => {
            app.move_staff_to_waiting(&department, &staff_id);
        }
        None => {}
    }

    go_back
}
