//! Snapshot management: create a copy of the live month, open saved
//! copies through their tabs, and delete them (tab included).

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{COPY, FOLDER_OPEN, PLUS, TRASH};

use super::app::App;
use super::components::{back_button, panel_header, primary_button_with_icon, styled_button_with_icon};

/// Show the snapshots panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Roster Snapshots");

    // Create form: duplicates the live month at this point in time
    ui.group(|ui| {
        ui.label(RichText::new(format!("{COPY} Create a snapshot")).strong());
        ui.add_space(5.0);
        ui.label(
            RichText::new("Saves a named copy of the live month's shifts, waiting pools, statuses, and notes.")
                .small()
                .weak(),
        );
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Name:");
            ui.add(
                egui::TextEdit::singleline(&mut app.snapshot_name_input)
                    .desired_width(220.0)
                    .hint_text("e.g. July draft"),
            );

            let can_create = !app.is_snapshot_view();
            let label = format!("Create from {month}/{year}", month = app.month, year = app.year);
            if ui
                .add_enabled(can_create, egui::Button::new(format!("{PLUS} {label}")))
                .clicked()
            {
                let name = app.snapshot_name_input.clone();
                app.create_snapshot(&name);
            }
            if !can_create {
                ui.label(RichText::new("(switch to the live month first)").small().weak());
            }
        });
    });

    ui.add_space(15.0);
    ui.separator();
    ui.add_space(10.0);

    // Saved snapshots, one tab each
    ui.label(format!("{count} saved snapshot(s)", count = app.tabs.len()));
    ui.add_space(10.0);

    let mut open_tab = None;
    let mut delete_tab = None;

    ScrollArea::vertical().id_salt("snapshot_scroll").show(ui, |ui| {
        egui::Grid::new("snapshot_grid")
            .num_columns(3)
            .striped(true)
            .min_col_width(120.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Name");
                ui.strong("");
                ui.strong("");
                ui.end_row();

                for tab in &app.tabs {
                    let is_open = app.roster.snapshot_id.as_deref() == Some(tab.snapshot_id.as_str());
                    if is_open {
                        ui.label(RichText::new(&tab.name).strong());
                    } else {
                        ui.label(&tab.name);
                    }

                    if styled_button_with_icon(ui, FOLDER_OPEN, "Open").clicked() {
                        open_tab = Some(tab.clone());
                    }
                    if styled_button_with_icon(ui, TRASH, "Delete").clicked() {
                        delete_tab = Some(tab.clone());
                    }
                    ui.end_row();
                }

                if app.tabs.is_empty() {
                    ui.label(RichText::new("No snapshots yet").weak());
                    ui.end_row();
                }
            });
    });

    if let Some(tab) = open_tab {
        app.log_info(format!("Opening snapshot: {name}", name = tab.name));
        app.open_snapshot(&tab);
    }
    if let Some(tab) = delete_tab {
        app.delete_target = Some(tab);
        app.show_delete_confirm = true;
    }

    ui.add_space(15.0);

    if app.is_snapshot_view() && primary_button_with_icon(ui, FOLDER_OPEN, "Back to Live Month").clicked() {
        app.open_live();
    }

    go_back
}
