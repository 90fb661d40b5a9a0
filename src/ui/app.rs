//! Main application UI state and async plumbing.

use chrono::{DateTime, Datelike, Local};
use eframe::egui::{self, Align, Layout};
use tokio::sync::mpsc;

use crate::api::RosterApi;
use crate::cache::SnapshotCache;
use crate::config::AppConfig;
use crate::export;
use crate::loader::{LoadedRoster, RosterLoader};
use crate::models::note::{get_note, remove_note, set_note};
use crate::models::snapshot::{RosterSnapshot, RosterTab};
use crate::models::staff::Staff;
use crate::models::status::{DayStatus, get_status, set_status};
use crate::roster::optimistic::PendingWrites;
use crate::roster::{RosterFilter, RosterRow, RowSpans, build_projection};

use super::components::colors;
use super::{board_panel, dashboard, roster_panel, settings_panel, snapshot_panel};

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Dashboard,
    Roster,
    Board,
    Snapshots,
    Settings,
}

impl Panel {
    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::Roster => "Monthly Roster",
            Panel::Board => "Assignment Board",
            Panel::Snapshots => "Snapshots",
            Panel::Settings => "Settings",
        }
    }
}

/// What the roster and board views are currently bound to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewSource {
    /// The live month on the backend.
    #[default]
    Live,
    /// A saved snapshot bundle, edited locally until explicitly saved.
    Snapshot { id: String },
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    // Data loading
    DirectoryLoaded(Vec<Staff>),
    RosterLoaded {
        generation: u64,
        roster: Box<LoadedRoster>,
    },
    TabsLoaded(Vec<RosterTab>),
    LoadError {
        generation: u64,
        message: String,
    },

    // Optimistic writes
    StatusWriteSettled {
        staff_id: String,
        day: u32,
        ticket: u64,
        error: Option<String>,
    },
    NoteWriteFailed(String),
    BoardSaveFailed {
        department: String,
        error: String,
    },

    // Snapshots
    SnapshotCreated {
        snapshot: Box<RosterSnapshot>,
        tab: RosterTab,
    },
    SnapshotSaved,
    SnapshotDeleted {
        tab_id: String,
    },
    OperationFailed(String),

    // Connection tests
    ServerTestResult(bool),
}

/// Editor dialog for one (staff, day) cell: status code plus note text.
#[derive(Default, Clone)]
pub struct CellEditor {
    pub staff_id: String,
    pub display_name: String,
    pub day: u32,
    pub status_input: String,
    pub note_input: String,
    pub is_open: bool,
}

impl CellEditor {
    /// Open the editor pre-filled with the cell's current state.
    pub fn open(row: &RosterRow, day: u32, status: Option<&DayStatus>, note: Option<&str>) -> Self {
        Self {
            staff_id: row.staff_id.clone(),
            display_name: row.display_name.clone(),
            day,
            status_input: status.map(|s| s.code().to_string()).unwrap_or_default(),
            note_input: note.unwrap_or_default().to_string(),
            is_open: true,
        }
    }
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Main application state.
pub struct App {
    // Runtime and backend access
    pub rt: tokio::runtime::Runtime,
    pub api: RosterApi,
    pub loader: RosterLoader,
    pub cache: Option<SnapshotCache>,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    // Navigation
    pub current_panel: Panel,
    pub view_source: ViewSource,

    // Focused month
    pub month: u32,
    pub year: i32,

    // Loaded data
    pub directory: Vec<Staff>,
    pub roster: LoadedRoster,
    pub tabs: Vec<RosterTab>,

    // Derived views, recomputed whenever roster or filter changes
    pub projection: Vec<RosterRow>,
    pub filtered: Vec<RosterRow>,
    pub spans: RowSpans,
    pub filter: RosterFilter,

    // Latest-request-wins guard for roster fetches
    fetch_generation: u64,
    pub is_loading: bool,

    // Optimistic status writes awaiting settlement
    pending_status: PendingWrites<(String, u32), Option<DayStatus>>,

    // Unsaved snapshot edits
    pub snapshot_dirty: bool,

    // Forms and dialogs
    pub cell_editor: CellEditor,
    pub snapshot_name_input: String,
    pub board_department: Option<String>,
    pub show_delete_confirm: bool,
    pub delete_target: Option<RosterTab>,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub warning_message: Option<String>,

    // Log messages
    pub log_messages: Vec<LogEntry>,

    // Configuration
    pub config: AppConfig,
    pub config_modified: bool,
    pub server_test_status: Option<bool>,
    server_test_pending: bool,
}

impl App {
    pub fn new(api: RosterApi, cache: Option<SnapshotCache>, config: AppConfig, rt: tokio::runtime::Runtime) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let loader = RosterLoader::new(api.clone(), cache.clone());
        let today = Local::now().date_naive();

        let mut app = Self {
            rt,
            api,
            loader,
            cache,
            tx,
            rx,
            current_panel: Panel::default(),
            view_source: ViewSource::default(),
            month: today.month(),
            year: today.year(),
            directory: Vec::new(),
            roster: LoadedRoster::default(),
            tabs: Vec::new(),
            projection: Vec::new(),
            filtered: Vec::new(),
            spans: RowSpans::default(),
            filter: RosterFilter::default(),
            fetch_generation: 0,
            is_loading: false,
            pending_status: PendingWrites::default(),
            snapshot_dirty: false,
            cell_editor: CellEditor::default(),
            snapshot_name_input: String::new(),
            board_department: None,
            show_delete_confirm: false,
            delete_target: None,
            error_message: None,
            success_message: None,
            warning_message: None,
            log_messages: Vec::new(),
            config,
            config_modified: false,
            server_test_status: None,
            server_test_pending: false,
        };

        // Load initial data; the roster load follows once the directory
        // arrives, since default-record seeding needs it
        app.load_directory();
        app.load_tabs();

        app
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    /// Log an info message.
    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    /// Log a success message.
    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    /// Log a warning message.
    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    /// Log an error message.
    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// True when the roster view shows a snapshot instead of the live month.
    pub fn is_snapshot_view(&self) -> bool {
        matches!(self.view_source, ViewSource::Snapshot { .. })
    }

    /// Recompute projection, filtered list, and rowspans from current state.
    pub fn refresh_projection(&mut self) {
        self.projection = build_projection(&self.roster.groups, &self.directory);
        self.filtered = self.filter.apply(&self.projection);
        self.spans = RowSpans::compute(&self.filtered);
    }

    /// Re-apply the filter after a criteria change.
    pub fn apply_filter(&mut self) {
        self.filtered = self.filter.apply(&self.projection);
        self.spans = RowSpans::compute(&self.filtered);
    }

    /// Load the staff directory.
    pub fn load_directory(&mut self) {
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match api.fetch_staff().await {
                Ok(staff) => {
                    let _ = tx.send(UiMessage::DirectoryLoaded(staff));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(format!("Staff directory unavailable: {e}")));
                }
            }
        });
    }

    /// Load the snapshot navigation tabs.
    pub fn load_tabs(&mut self) {
        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match api.fetch_tabs().await {
                Ok(tabs) => {
                    let _ = tx.send(UiMessage::TabsLoaded(tabs));
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(format!("Tabs unavailable: {e}")));
                }
            }
        });
    }

    /// (Re)load the roster for the current view source and month.
    ///
    /// Each load is stamped with a generation; a slow response arriving
    /// after a newer request started is discarded on receipt, so the last
    /// requested view always wins.
    pub fn load_roster(&mut self) {
        self.fetch_generation += 1;
        let generation = self.fetch_generation;
        self.is_loading = true;

        let loader = self.loader.clone();
        let tx = self.tx.clone();
        let directory = self.directory.clone();
        let source = self.view_source.clone();
        let (month, year) = (self.month, self.year);
        // Current data doubles as caller-supplied fallback when refreshing
        // the same snapshot
        let fallback = match &source {
            ViewSource::Snapshot { id } if self.roster.snapshot_id.as_deref() == Some(id) => self.current_bundle(),
            _ => None,
        };

        self.rt.spawn(async move {
            let result = match source {
                ViewSource::Live => loader.load_live(month, year, &directory).await,
                ViewSource::Snapshot { id } => Ok(loader.load_snapshot(&id, fallback).await),
            };
            let msg = match result {
                Ok(roster) => UiMessage::RosterLoaded {
                    generation,
                    roster: Box::new(roster),
                },
                Err(e) => UiMessage::LoadError {
                    generation,
                    message: e.to_string(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    /// Switch the roster view to the live month and reload.
    pub fn open_live(&mut self) {
        self.view_source = ViewSource::Live;
        self.snapshot_dirty = false;
        self.load_roster();
    }

    /// Switch the roster view to a snapshot tab and reload.
    pub fn open_snapshot(&mut self, tab: &RosterTab) {
        self.view_source = ViewSource::Snapshot {
            id: tab.snapshot_id.clone(),
        };
        self.snapshot_dirty = false;
        self.current_panel = Panel::Roster;
        self.load_roster();
    }

    /// Step the focused month by `delta` months and reload the live view.
    pub fn shift_month(&mut self, delta: i32) {
        let total = self.year * 12 + self.month as i32 - 1 + delta;
        self.year = total.div_euclid(12);
        self.month = (total.rem_euclid(12) + 1) as u32;
        if !self.is_snapshot_view() {
            self.load_roster();
        }
    }

    /// Rebuild the currently viewed snapshot bundle from local state.
    fn current_bundle(&self) -> Option<RosterSnapshot> {
        let id = self.roster.snapshot_id.clone()?;
        Some(RosterSnapshot {
            id,
            name: self.roster.snapshot_name.clone().unwrap_or_default(),
            month: self.roster.month,
            year: self.roster.year,
            groups: self.roster.groups.clone(),
            statuses: self.roster.statuses.clone(),
            notes: self.roster.notes.clone(),
        })
    }

    /// Edit one status cell.
    ///
    /// Live view: apply locally first, confirm against the backend, and
    /// roll the cell back if the write fails. Snapshot view: local edit
    /// only, persisted by the explicit save action.
    pub fn set_status_cell(&mut self, staff_id: &str, day: u32, value: Option<DayStatus>) {
        let prior = set_status(&mut self.roster.statuses, staff_id, day, value.clone());

        if self.is_snapshot_view() {
            self.snapshot_dirty = true;
            return;
        }

        let ticket = self.pending_status.begin((staff_id.to_string(), day), prior);
        let api = self.api.clone();
        let tx = self.tx.clone();
        let (month, year) = (self.roster.month, self.roster.year);
        let staff_id = staff_id.to_string();

        self.rt.spawn(async move {
            let result = api.update_status(month, year, &staff_id, day, value.as_ref()).await;
            let _ = tx.send(UiMessage::StatusWriteSettled {
                staff_id,
                day,
                ticket,
                error: result.err().map(|e| e.to_string()),
            });
        });
    }

    /// Create, replace, or delete the note for one cell.
    ///
    /// The local edit is kept even if the backend write fails; the failure
    /// is surfaced so the user can retry instead of losing the text.
    pub fn set_note_text(&mut self, staff_id: &str, day: u32, text: &str) {
        let trimmed = text.trim().to_string();
        if trimmed.is_empty() {
            remove_note(&mut self.roster.notes, staff_id, day);
        } else {
            set_note(&mut self.roster.notes, staff_id, day, &trimmed);
        }

        if self.is_snapshot_view() {
            self.snapshot_dirty = true;
            return;
        }

        let api = self.api.clone();
        let tx = self.tx.clone();
        let (month, year) = (self.roster.month, self.roster.year);
        let staff_id = staff_id.to_string();

        self.rt.spawn(async move {
            let text = if trimmed.is_empty() { None } else { Some(trimmed.as_str()) };
            if let Err(e) = api.update_note(month, year, &staff_id, day, text).await {
                let _ = tx.send(UiMessage::NoteWriteFailed(format!(
                    "Note for day {day} was not saved: {e}"
                )));
            }
        });
    }

    /// Move a staff member into a shift on the assignment board.
    pub fn assign_staff(&mut self, department: &str, staff_id: &str, shift_index: usize) {
        let Some(group) = self.roster.groups.get_mut(department) else {
            return;
        };
        if group.assign(staff_id, shift_index) {
            self.persist_group(department);
        }
    }

    /// Move a staff member back to the waiting pool.
    pub fn move_staff_to_waiting(&mut self, department: &str, staff_id: &str) {
        let Some(group) = self.roster.groups.get_mut(department) else {
            return;
        };
        group.move_to_waiting(staff_id);
        self.persist_group(department);
    }

    /// Persist one department's record after a board mutation, and refresh
    /// the derived views.
    fn persist_group(&mut self, department: &str) {
        self.refresh_projection();

        if self.is_snapshot_view() {
            self.snapshot_dirty = true;
            return;
        }

        let Some(group) = self.roster.groups.get(department).cloned() else {
            return;
        };
        let api = self.api.clone();
        let tx = self.tx.clone();
        let (month, year) = (self.roster.month, self.roster.year);
        let department = department.to_string();

        self.rt.spawn(async move {
            if let Err(e) = api.save_group_roster(month, year, &group).await {
                let _ = tx.send(UiMessage::BoardSaveFailed {
                    department,
                    error: e.to_string(),
                });
            }
        });
    }

    /// Duplicate the live month into a new named snapshot with its tab.
    pub fn create_snapshot(&mut self, name: &str) {
        if self.is_snapshot_view() {
            self.error_message = Some("Snapshots are created from the live month view".to_string());
            return;
        }
        let name = name.trim();
        if name.is_empty() {
            self.error_message = Some("Snapshot name cannot be empty".to_string());
            return;
        }

        let bundle = RosterSnapshot::from_live(
            name,
            self.roster.month,
            self.roster.year,
            &self.roster.groups,
            &self.roster.statuses,
            &self.roster.notes,
        );
        let api = self.api.clone();
        let cache = self.cache.clone();
        let tx = self.tx.clone();
        let name = name.to_string();

        self.rt.spawn(async move {
            let result = async {
                let created = api.create_snapshot(&bundle).await?;
                let tab = api.create_tab(&name, &created.id).await?;
                Ok::<_, crate::error::AppError>((created, tab))
            }
            .await;

            match result {
                Ok((snapshot, tab)) => {
                    if let Some(cache) = cache {
                        let _ = cache.set(&snapshot);
                    }
                    let _ = tx.send(UiMessage::SnapshotCreated {
                        snapshot: Box::new(snapshot),
                        tab,
                    });
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(format!("Snapshot not created: {e}")));
                }
            }
        });
    }

    /// Explicitly persist the currently viewed snapshot's local edits.
    pub fn save_snapshot(&mut self) {
        let Some(bundle) = self.current_bundle() else {
            return;
        };
        let api = self.api.clone();
        let cache = self.cache.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            match api.save_snapshot(&bundle).await {
                Ok(()) => {
                    if let Some(cache) = cache {
                        let _ = cache.set(&bundle);
                    }
                    let _ = tx.send(UiMessage::SnapshotSaved);
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(format!("Snapshot not saved: {e}")));
                }
            }
        });
    }

    /// Delete a snapshot, cascading to its tab record.
    pub fn delete_snapshot(&mut self, tab: RosterTab) {
        let api = self.api.clone();
        let cache = self.cache.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = async {
                api.delete_snapshot(&tab.snapshot_id).await?;
                api.delete_tab(&tab.id).await
            }
            .await;

            match result {
                Ok(()) => {
                    if let Some(cache) = cache {
                        let _ = cache.remove(&tab.snapshot_id);
                    }
                    let _ = tx.send(UiMessage::SnapshotDeleted { tab_id: tab.id });
                }
                Err(e) => {
                    let _ = tx.send(UiMessage::OperationFailed(format!("Snapshot not deleted: {e}")));
                }
            }
        });
    }

    /// Export the current filtered view to an Excel file.
    pub fn export_roster(&mut self) {
        if self.filtered.is_empty() {
            self.warning_message = Some("Nothing to export: the filtered roster is empty".to_string());
            self.log_warning("Export skipped: no rows");
            return;
        }

        let default_name = export::generate_export_filename(self.roster.month, self.roster.year);
        let Some(path) = export::show_save_dialog(&default_name) else {
            return;
        };

        match export::export_roster_to_excel(
            &self.filtered,
            self.roster.month,
            self.roster.year,
            &self.roster.statuses,
            &self.roster.notes,
            &path,
        ) {
            Ok(true) => {
                let shown = path.display().to_string();
                self.success_message = Some(format!("Exported to: {shown}"));
                self.log_success(format!("Exported roster: {shown}"));
            }
            Ok(false) => {
                self.warning_message = Some("Nothing to export: the filtered roster is empty".to_string());
            }
            Err(e) => {
                self.error_message = Some(format!("Export failed: {e}"));
                self.log_error(format!("Export failed: {e}"));
            }
        }
    }

    /// Test backend connection.
    pub fn test_server_connection(&mut self) {
        self.log_info("Testing server connection...");
        self.server_test_pending = true;

        let api = self.api.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let ok = api.test_connection().await.unwrap_or(false);
            let _ = tx.send(UiMessage::ServerTestResult(ok));
        });
    }

    /// Save current configuration to disk.
    pub fn save_config(&mut self) {
        let path = AppConfig::default_path();
        match self.config.save(&path) {
            Ok(()) => {
                self.config_modified = false;
                self.log_success("Settings saved");
            }
            Err(e) => {
                self.error_message = Some(format!("Failed to save settings: {e}"));
            }
        }
    }

    /// Drop every locally cached snapshot bundle.
    pub fn clear_snapshot_cache(&mut self) {
        let Some(cache) = &self.cache else {
            return;
        };
        match cache.clear() {
            Ok(()) => self.log_success("Snapshot cache cleared"),
            Err(e) => self.log_error(format!("Cache clear failed: {e}")),
        }
    }

    /// Clear the activity log.
    pub fn clear_log(&mut self) {
        self.log_messages.clear();
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::DirectoryLoaded(staff) => {
                    self.log_info(format!("Staff directory loaded: {} members", staff.len()));
                    self.directory = staff;
                    // Roster load waits for the directory (default-record
                    // seeding resolves against it)
                    self.load_roster();
                }
                UiMessage::RosterLoaded { generation, roster } => {
                    if generation != self.fetch_generation {
                        tracing::debug!("Discarding stale roster response (generation {generation})");
                        continue;
                    }
                    self.is_loading = false;
                    for warning in &roster.warnings {
                        self.log(LogLevel::Warning, warning.clone());
                    }
                    if let Some(first) = roster.warnings.first() {
                        self.warning_message = Some(first.clone());
                    }
                    self.roster = *roster;
                    self.refresh_projection();
                }
                UiMessage::TabsLoaded(tabs) => {
                    self.tabs = tabs;
                }
                UiMessage::LoadError { generation, message } => {
                    if generation != self.fetch_generation {
                        continue;
                    }
                    self.is_loading = false;
                    self.error_message = Some(message.clone());
                    self.log_error(message);
                }
                UiMessage::StatusWriteSettled {
                    staff_id,
                    day,
                    ticket,
                    error,
                } => {
                    let key = (staff_id.clone(), day);
                    match error {
                        None => self.pending_status.commit(&key, ticket),
                        Some(e) => {
                            if let Some(prior) = self.pending_status.rollback(&key, ticket) {
                                set_status(&mut self.roster.statuses, &staff_id, day, prior);
                            }
                            self.error_message = Some(format!("Status for day {day} was not saved: {e}"));
                            self.log_error(format!("Status write failed ({staff_id}, day {day}): {e}"));
                        }
                    }
                }
                UiMessage::NoteWriteFailed(message) => {
                    self.error_message = Some(message.clone());
                    self.log_error(message);
                }
                UiMessage::BoardSaveFailed { department, error } => {
                    self.error_message = Some(format!("Changes to '{department}' were not saved: {error}"));
                    self.log_error(format!("Board save failed for {department}: {error}"));
                    // Resync with the backend's view of the month
                    self.load_roster();
                }
                UiMessage::SnapshotCreated { snapshot, tab } => {
                    self.success_message = Some(format!("Snapshot '{name}' created", name = snapshot.name));
                    self.log_success(format!("Snapshot '{name}' created", name = snapshot.name));
                    self.snapshot_name_input.clear();
                    self.tabs.push(tab);
                }
                UiMessage::SnapshotSaved => {
                    self.snapshot_dirty = false;
                    self.success_message = Some("Snapshot saved".to_string());
                    self.log_success("Snapshot saved");
                }
                UiMessage::SnapshotDeleted { tab_id } => {
                    let deleted_current = self
                        .tabs
                        .iter()
                        .find(|t| t.id == tab_id)
                        .is_some_and(|t| self.roster.snapshot_id.as_deref() == Some(t.snapshot_id.as_str()));
                    self.tabs.retain(|t| t.id != tab_id);
                    self.success_message = Some("Snapshot deleted".to_string());
                    self.log_success("Snapshot deleted");
                    if deleted_current {
                        self.open_live();
                    }
                }
                UiMessage::OperationFailed(e) => {
                    self.error_message = Some(e.clone());
                    self.log_error(e);
                }
                UiMessage::ServerTestResult(ok) => {
                    self.server_test_pending = false;
                    self.server_test_status = Some(ok);
                    if ok {
                        self.log_success("Server connection successful");
                    } else {
                        self.log_error("Server connection failed");
                    }
                }
            }
        }
    }

    /// Render menu bar.
    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("Tools", |ui| {
                    if ui.button("Refresh Data").clicked() {
                        self.load_directory();
                        self.load_tabs();
                        ui.close();
                    }
                    if ui.button("Export Roster").clicked() {
                        self.export_roster();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Test Server Connection").clicked() {
                        self.test_server_connection();
                        ui.close();
                    }
                });
                ui.menu_button("Settings", |ui| {
                    if ui.button("Open Settings").clicked() {
                        self.current_panel = Panel::Settings;
                        ui.close();
                    }
                });
            });
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.disable();
                ui.horizontal(|ui| {
                    // Server status (left side)
                    let (color, text) = match self.server_test_status {
                        None => (colors::NEUTRAL, "Unchecked"),
                        Some(true) => (colors::SUCCESS, "Reachable"),
                        Some(false) => (colors::ERROR, "Unreachable"),
                    };
                    if self.server_test_pending || self.is_loading {
                        ui.spinner();
                    }
                    ui.colored_label(color, format!("Server: {text}"));

                    ui.separator();
                    ui.label(format!("Month: {month}/{year}", month = self.month, year = self.year));

                    if self.is_snapshot_view() {
                        ui.separator();
                        let name = self.roster.snapshot_name.as_deref().unwrap_or("snapshot");
                        let suffix = if self.snapshot_dirty { " (unsaved)" } else { "" };
                        ui.colored_label(colors::WARNING, format!("Viewing snapshot: {name}{suffix}"));
                    }

                    // Pending optimistic writes (right side)
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if !self.pending_status.is_empty() {
                            ui.label(format!("{} pending write(s)", self.pending_status.len()));
                        }
                    });
                });
            });
    }

    /// Render the cell editor dialog (status code plus note).
    fn show_cell_editor(&mut self, ctx: &egui::Context) {
        if !self.cell_editor.is_open {
            return;
        }

        let mut open = true;
        let mut save_clicked = false;
        let title = format!(
            "{name} - day {day}",
            name = self.cell_editor.display_name,
            day = self.cell_editor.day
        );

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add_space(5.0);

                ui.label("Status:");
                ui.horizontal_wrapped(|ui| {
                    if ui
                        .selectable_label(self.cell_editor.status_input.is_empty(), "(none)")
                        .clicked()
                    {
                        self.cell_editor.status_input.clear();
                    }
                    for choice in DayStatus::fixed_choices() {
                        let selected = self.cell_editor.status_input == choice.code();
                        if ui.selectable_label(selected, choice.code()).clicked() {
                            self.cell_editor.status_input = choice.code().to_string();
                        }
                    }
                });

                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    ui.label("Custom code:");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.cell_editor.status_input)
                            .desired_width(100.0)
                            .hint_text("e.g. WFH"),
                    );
                });

                ui.add_space(10.0);
                ui.label("Note:");
                ui.add(
                    egui::TextEdit::multiline(&mut self.cell_editor.note_input)
                        .desired_rows(3)
                        .desired_width(260.0),
                );

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.cell_editor.is_open = false;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Save").clicked() {
                            save_clicked = true;
                        }
                    });
                });
            });

        if save_clicked {
            let editor = self.cell_editor.clone();
            let current = get_status(&self.roster.statuses, &editor.staff_id, editor.day).cloned();
            let requested = DayStatus::from_code(&editor.status_input);
            if requested != current {
                self.set_status_cell(&editor.staff_id, editor.day, requested);
            }
            let current_note = get_note(&self.roster.notes, &editor.staff_id, editor.day).unwrap_or_default();
            if editor.note_input.trim() != current_note {
                self.set_note_text(&editor.staff_id, editor.day, &editor.note_input);
            }
            self.cell_editor.is_open = false;
        }

        if !open {
            self.cell_editor.is_open = false;
        }
    }

    /// Render modal dialogs (error, success, warning, delete confirmation).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        // Error dialog
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        // Success dialog
        if let Some(ref msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }

        // Delete confirmation dialog
        if self.show_delete_confirm
            && let Some(ref target) = self.delete_target.clone()
        {
            egui::Window::new("Delete Snapshot")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(format!(
                        "Delete snapshot '{name}'? Its tab is removed as well.",
                        name = target.name
                    ));
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.show_delete_confirm = false;
                            self.delete_target = None;
                        }
                        if ui.button("Delete").clicked() {
                            if let Some(tab) = self.delete_target.take() {
                                self.log_info(format!("Deleting snapshot: {name}", name = tab.name));
                                self.delete_snapshot(tab);
                            }
                            self.show_delete_confirm = false;
                        }
                    });
                });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        // Request repaint during async operations
        if self.is_loading || self.server_test_pending || !self.pending_status.is_empty() {
            ctx.request_repaint();
        }

        // Menu bar
        self.show_menu_bar(ctx);

        // Status bar
        self.show_status_bar(ctx);

        // Cell editor dialog
        self.show_cell_editor(ctx);

        // Modal dialogs (error, success, delete confirmation)
        self.show_dialogs(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.current_panel {
            Panel::Dashboard => {
                if let Some(next) = dashboard::show(self, ui) {
                    self.current_panel = next;
                }
            }
            Panel::Roster => {
                if roster_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::Board => {
                if board_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::Snapshots => {
                if snapshot_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
            Panel::Settings => {
                if settings_panel::show(self, ui) {
                    self.current_panel = Panel::Dashboard;
                }
            }
        });
    }
}
