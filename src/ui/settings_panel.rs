//! Settings panel for server, roster, and UI configuration.

use eframe::egui::{self, RichText};

use super::app::App;
use super::components::{back_button, colors, panel_header};

/// Show the settings panel.
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut egui::Ui) -> bool {
    let go_back = back_button(ui);
    panel_header(ui, "Settings");

    egui::ScrollArea::vertical().show(ui, |ui| {
        // Server Configuration
        ui.group(|ui| {
            ui.heading("Server Configuration");
            ui.add_space(5.0);

            egui::Grid::new("server_settings_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Base URL:");
                    if ui.text_edit_singleline(&mut app.config.server.base_url).changed() {
                        app.config_modified = true;
                        app.server_test_status = None; // Reset status on change
                    }
                    ui.end_row();

                    ui.label("Timeout (seconds):");
                    let mut timeout_str = app.config.server.timeout_secs.to_string();
                    if ui.text_edit_singleline(&mut timeout_str).changed()
                        && let Ok(timeout) = timeout_str.parse()
                    {
                        app.config.server.timeout_secs = timeout;
                        app.config_modified = true;
                        app.server_test_status = None;
                    }
                    ui.end_row();
                });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                if ui.button("Test Server Connection").clicked() {
                    app.server_test_status = None;
                    app.test_server_connection();
                }

                // Inline status indicator
                match app.server_test_status {
                    Some(true) => {
                        ui.label(RichText::new("Connected").color(colors::SUCCESS));
                    }
                    Some(false) => {
                        ui.label(RichText::new("Failed").color(colors::ERROR));
                    }
                    None => {}
                }
            });

            ui.add_space(5.0);
            ui.label(
                RichText::new("Changes to the server settings take effect after restart.")
                    .small()
                    .weak(),
            );
        });

        ui.add_space(15.0);

        // Roster Options
        ui.group(|ui| {
            ui.heading("Roster Options");
            ui.add_space(5.0);

            if ui
                .checkbox(&mut app.config.roster.cache_snapshots, "Keep a local copy of loaded snapshots")
                .changed()
            {
                app.config_modified = true;
            }

            ui.add_space(5.0);

            if ui.button("Clear Snapshot Cache").clicked() {
                app.clear_snapshot_cache();
            }
        });

        ui.add_space(15.0);

        // UI Options
        ui.group(|ui| {
            ui.heading("UI Options");
            ui.add_space(5.0);

            if ui
                .checkbox(&mut app.config.ui.start_maximized, "Start maximized")
                .changed()
            {
                app.config_modified = true;
            }

            if ui
                .checkbox(&mut app.config.ui.show_activity_log, "Show activity log on dashboard")
                .changed()
            {
                app.config_modified = true;
            }
        });

        ui.add_space(20.0);

        // Action buttons
        ui.horizontal(|ui| {
            let save_btn = egui::Button::new("Save Settings");
            if ui.add_enabled(app.config_modified, save_btn).clicked() {
                app.save_config();
            }

            if app.config_modified {
                ui.label(RichText::new("(unsaved changes)").color(colors::WARNING).italics());
            }

            if ui.button("Reset to Defaults").clicked() {
                app.config = crate::config::AppConfig::default();
                app.config_modified = true;
                app.server_test_status = None;
            }
        });
    });

    go_back
}
