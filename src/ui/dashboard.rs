//! Dashboard panel with stats, navigation cards, quick actions, and activity log.

use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{CALENDAR_BLANK, COPY, GEAR, KANBAN};

use super::app::{App, LogLevel, Panel};
use super::components::dashboard_card;

/// Show the dashboard panel.
///
/// Returns `Some(panel)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next_panel = None;

    ui.vertical_centered(|ui| {
        ui.add_space(30.0);

        // Header
        ui.label(RichText::new("Rosterdesk").size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new("Shift Scheduling and Leave Tracking").size(14.0).weak());

        ui.add_space(30.0);

        // Stat cards row
        ui.horizontal(|ui| {
            let available = ui.available_width();
            let start_offset = ((available - 680.0) / 2.0).max(0.0);
            ui.add_space(start_offset);

            let departments = app.roster.groups.len();
            let assigned: usize = app.roster.groups.values().map(|g| g.assigned_count()).sum();
            let waiting: usize = app.roster.groups.values().map(|g| g.waiting.len()).sum();

            stat_card(ui, "Staff", &app.directory.len().to_string(), "Directory members");
            stat_card(ui, "Departments", &departments.to_string(), "With shift records");
            stat_card(
                ui,
                "Assigned",
                &assigned.to_string(),
                &format!("Shift slots {month}/{year}", month = app.roster.month, year = app.roster.year),
            );
            stat_card(ui, "Waiting", &waiting.to_string(), "Unassigned this month");
        });

        ui.add_space(30.0);

        // Navigation cards row
        let available = ui.available_width();
        let num_cards = 4.0;
        let spacing = 30.0;
        let total_spacing = spacing * (num_cards - 1.0);
        let card_width = ((available - total_spacing) / num_cards).clamp(150.0, 250.0);
        let card_height = card_width * 0.75;
        let card_size = egui::vec2(card_width, card_height);
        let total_width = card_width * num_cards + total_spacing;
        let start_offset = ((available - total_width) / 2.0).max(0.0);

        ui.horizontal(|ui| {
            ui.add_space(start_offset);

            if dashboard_card(ui, "Monthly Roster", "Status grid & export", CALENDAR_BLANK, card_size).clicked() {
                next_panel = Some(Panel::Roster);
            }

            ui.add_space(spacing);

            if dashboard_card(ui, "Assignment Board", "Shifts & waiting pool", KANBAN, card_size).clicked() {
                next_panel = Some(Panel::Board);
            }

            ui.add_space(spacing);

            if dashboard_card(ui, "Snapshots", "Saved month copies", COPY, card_size).clicked() {
                next_panel = Some(Panel::Snapshots);
            }

            ui.add_space(spacing);

            if dashboard_card(ui, "Settings", "Server & preferences", GEAR, card_size).clicked() {
                next_panel = Some(Panel::Settings);
            }
        });

        ui.add_space(30.0);
    });

    // Two-column layout: Quick Actions | Recent Activity
    let available_width = ui.available_width();
    let column_width = (available_width - 40.0) / 2.0;

    ui.horizontal(|ui| {
        ui.add_space(10.0);

        // Left column - Quick Actions
        ui.vertical(|ui| {
            ui.set_width(column_width);

            egui::Frame::new()
                .fill(ui.style().visuals.extreme_bg_color)
                .inner_margin(Margin::same(15))
                .corner_radius(CornerRadius::same(8))
                .show(ui, |ui| {
                    ui.set_min_width(column_width - 30.0);

                    ui.label(RichText::new("Quick Actions").strong());
                    ui.add_space(10.0);

                    if ui.button("Refresh Roster").clicked() {
                        app.load_roster();
                    }

                    ui.add_space(5.0);

                    if ui.button("Export This Month").clicked() {
                        app.export_roster();
                    }

                    ui.add_space(5.0);

                    if ui.button("Create Snapshot").clicked() {
                        next_panel = Some(Panel::Snapshots);
                    }
                });
        });

        ui.add_space(20.0);

        // Right column - Recent Activity
        ui.vertical(|ui| {
            ui.set_width(column_width);

            egui::Frame::new()
                .fill(ui.style().visuals.extreme_bg_color)
                .inner_margin(Margin::same(15))
                .corner_radius(CornerRadius::same(8))
                .show(ui, |ui| {
                    ui.set_min_width(column_width - 30.0);

                    ui.label(RichText::new("Recent Activity").strong());
                    ui.add_space(10.0);

                    if !app.config.ui.show_activity_log {
                        ui.label(RichText::new("Activity log disabled in settings").weak());
                        return;
                    }

                    ScrollArea::vertical().max_height(150.0).show(ui, |ui| {
                        if app.log_messages.is_empty() {
                            ui.label(RichText::new("No recent activity").weak());
                        } else {
                            for entry in app.log_messages.iter().rev().take(10) {
                                let color = match entry.level {
                                    LogLevel::Info => Color32::GRAY,
                                    LogLevel::Success => Color32::from_rgb(100, 200, 100),
                                    LogLevel::Warning => Color32::from_rgb(230, 180, 50),
                                    LogLevel::Error => Color32::from_rgb(230, 100, 100),
                                };

                                ui.horizontal(|ui| {
                                    ui.label(
                                        RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                            .small()
                                            .color(Color32::DARK_GRAY),
                                    );
                                    ui.label(RichText::new(&entry.message).color(color));
                                });
                            }
                        }
                    });
                });
        });
    });

    next_panel
}

/// Render a stat card with title, value, and subtitle.
fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(150.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}
