use std::path::PathBuf;
use tokio::sync::mpsc;

use testbench_dashboard::config::SettingsManager;
use testbench_dashboard::log_collector::get_global_logs_path;
use testbench_dashboard::ui::{DashboardApp, DialogFileService};
use testbench_dashboard::{AppState, LogCollector, LogLine};

#[tokio::main]
async fn main() -> testbench_dashboard::Result<()> {
    // =========================================================================
    // SETTINGS - read first, the log level lives there
    // =========================================================================
    let (settings, settings_path) = match SettingsManager::load() {
        Ok((settings, path)) => (settings, Some(path)),
        Err(e) => {
            eprintln!("[Main] WARNING: Settings will not be persisted: {}", e);
            (AppState::default(), None)
        }
    };

    // =========================================================================
    // LOG COLLECTOR - DECOUPLED FROM UI
    // =========================================================================
    let log_dir = get_global_logs_path().map_err(|e| format!("Failed to determine logs directory: {}", e))?;
    let (log_ui_tx, log_ui_rx) = mpsc::channel::<LogLine>(1024);
    let log_collector = LogCollector::new(log_dir, log_ui_tx, settings.level_filter())
        .map_err(|e| format!("LogCollector initialization failed: {}", e))?;

    if let Err(e) = log_collector.install() {
        eprintln!("[Main] WARNING: Failed to set LogCollector as global logger: {}", e);
    }
    log::info!(
        "Testbench Dashboard {} starting, logging to {}",
        testbench_dashboard::VERSION,
        log_collector.log_path().display()
    );

    // =========================================================================
    // INITIAL FILE - command line argument, else the last file if enabled
    // =========================================================================
    let initial_path = initial_path(std::env::args().nth(1), &settings);

    let (width, height) = (settings.window_width, settings.window_height);
    let mut app = DashboardApp::new(
        settings,
        settings_path,
        Box::new(DialogFileService),
        Some(log_ui_rx),
    );
    if let Some(path) = initial_path {
        app.open_path(&path);
    }

    // =========================================================================
    // LAUNCH EGUI
    // =========================================================================
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Testbench Dashboard")
            .with_inner_size([width, height]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Testbench Dashboard",
        options,
        Box::new(move |_cc| Box::new(app)),
    );

    // =========================================================================
    // SHUTDOWN
    // =========================================================================
    log::info!("Testbench Dashboard shutting down");
    if let Err(e) = log_collector.wait_for_empty().await {
        eprintln!("[Main] WARNING: Failed to wait for log collector to empty: {}", e);
    }

    result.map_err(|e| e.to_string().into())
}

fn initial_path(arg: Option<String>, settings: &AppState) -> Option<PathBuf> {
    match arg {
        Some(arg) => Some(PathBuf::from(arg)),
        None if settings.open_last_on_startup => settings.most_recent_file(),
        None => None,
    }
}
