//! Rosterdesk - Desktop admin dashboard for shift scheduling, rosters, and leave tracking.

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use rosterdesk as app;

use app::api::RosterApi;
use app::cache::SnapshotCache;
use app::config::{AppConfig, ConfigLoadResult};
use app::ui::App;

/// Desktop admin dashboard for shift scheduling, rosters, and leave tracking.
#[derive(Parser)]
#[command(name = "rosterdesk")]
struct Cli {
    /// Use config.toml from current directory and log to stderr (dev mode)
    #[arg(long)]
    dev: bool,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Initialize logging: stderr in dev mode, daily-rolling file otherwise
    let _log_guard = init_logging(cli.dev);

    tracing::info!("Rosterdesk starting...");

    // Determine config path based on mode
    let config_path = if let Some(path) = cli.config {
        path
    } else if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            config
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, starting with defaults");
            AppConfig::default()
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid, starting with defaults: {}", e);
            AppConfig::default()
        }
    };

    run_main_app(config)
}

/// Set up the tracing subscriber; the returned guard must outlive main.
fn init_logging(dev: bool) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    if dev {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
        return None;
    }

    let log_dir = directories::ProjectDirs::from("", "", "rosterdesk")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(log_dir, "rosterdesk.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Run the main application.
fn run_main_app(config: AppConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Rosterdesk")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([960.0, 640.0])
            .with_maximized(config.ui.start_maximized),
        ..Default::default()
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    let api = RosterApi::new(&config.server);

    // Snapshot fallback cache is best-effort; the app runs without it
    let cache = if config.roster.cache_snapshots {
        match SnapshotCache::open_default() {
            Ok(cache) => Some(cache),
            Err(e) => {
                tracing::warn!("Snapshot cache unavailable: {}", e);
                None
            }
        }
    } else {
        None
    };

    tracing::info!("Backend: {}", config.server.base_url);

    eframe::run_native(
        "Rosterdesk",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);

            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(App::new(api, cache, config, rt)))
        }),
    )
}
