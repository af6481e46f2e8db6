/// Main App Orchestrator and UI State Management
///
/// This module provides the eframe::App implementation for the dashboard. It owns
/// the controller, the chart canvas and the persisted settings, routes menu and
/// selector events to the controller, and lays out the panels every frame.

use eframe::egui;
use std::path::{Path, PathBuf};

use super::charts::{render_chart, ChartCanvas};
use super::panes::{render_pane, PaneAction};
use super::{DashboardController, FileService};
use crate::config::{AppState, SettingsManager};
use crate::error::AppError;
use crate::log_collector::LogLine;
use crate::models::Pane;
use crate::series::ChartTarget;

const APP_TITLE: &str = "Testbench Dashboard";

/// Transient UI state - state that doesn't persist across sessions
#[derive(Clone, Default)]
pub struct UIState {
    /// Error message to display (if any)
    pub error_message: Option<String>,

    /// Informational message (load confirmations)
    pub info_message: Option<String>,

    /// Banner text of the last unresolved selection, while it is showing
    pub selection_error: Option<String>,

    /// Latest log line, shown in the status bar
    pub status_line: Option<LogLine>,

    /// Title last sent to the viewport
    pub applied_title: Option<String>,

    /// Theme last applied (true = dark)
    pub applied_dark_mode: Option<bool>,
}

/// Main Application UI Structure
pub struct DashboardApp {
    pub controller: DashboardController,
    pub canvas: ChartCanvas,

    /// Persistent settings (recent files, window, theme)
    pub settings: AppState,

    /// Where settings are saved; None disables persistence
    settings_path: Option<PathBuf>,

    files: Box<dyn FileService>,

    /// Log lines forwarded by the LogCollector
    log_rx: Option<tokio::sync::mpsc::Receiver<LogLine>>,

    pub ui_state: UIState,
}

impl DashboardApp {
    pub fn new(
        settings: AppState,
        settings_path: Option<PathBuf>,
        files: Box<dyn FileService>,
        log_rx: Option<tokio::sync::mpsc::Receiver<LogLine>>,
    ) -> Self {
        Self {
            controller: DashboardController::new(),
            canvas: ChartCanvas::new(),
            settings,
            settings_path,
            files,
            log_rx,
            ui_state: UIState::default(),
        }
    }

    /// Load a results file and report the outcome in the message banners.
    ///
    /// A file that fails to load is dropped from the recent list.
    pub fn open_path(&mut self, path: &Path) {
        let outcome = self
            .controller
            .load_path(path, self.files.as_ref(), &mut self.canvas);

        match outcome {
            Ok(unresolved) => {
                self.ui_state.error_message = None;
                self.ui_state.selection_error = None;
                self.settings.push_recent_file(path);
                self.persist_settings();
                self.ui_state.info_message = Some(format!(
                    "Loaded {} ({} models)",
                    path.display(),
                    self.controller.dataset().map_or(0, |d| d.len())
                ));
                if let Some(e) = unresolved {
                    self.show_selection_error(AppError::from(e).user_message());
                }
            }
            Err(e) => {
                let was_recent = self
                    .settings
                    .recent_files
                    .iter()
                    .any(|entry| Path::new(entry) == path);
                if was_recent {
                    log::warn!("[UI] Removing {} from recent files", path.display());
                    self.settings.forget_recent_file(path);
                    self.persist_settings();
                }
                self.ui_state.info_message = None;
                self.ui_state.error_message = Some(AppError::from(e).user_message());
            }
        }
    }

    /// Show the file dialog, then load the chosen file
    pub fn open_dialog(&mut self) {
        let start_dir = self.settings.open_dir();
        match self.files.open_file(start_dir.as_deref()) {
            Some(path) => self.open_path(&path),
            None => log::debug!("[UI] Open dialog cancelled"),
        }
    }

    /// Apply a selector change from one of the panes
    pub fn apply_action(&mut self, action: PaneAction) {
        let result = match action {
            PaneAction::SelectModel(pane, model) => {
                log::debug!("[UI] {} model -> {}", pane, model.label());
                self.controller.select_model(pane, model, &mut self.canvas)
            }
            PaneAction::SelectBackend(pane, index) => {
                log::debug!("[UI] {} backend -> #{}", pane, index);
                self.controller.select_backend(pane, index, &mut self.canvas)
            }
        };
        match result {
            Ok(()) => self.clear_selection_error(),
            Err(e) => self.show_selection_error(AppError::from(e).user_message()),
        }
    }

    fn show_selection_error(&mut self, message: String) {
        self.ui_state.selection_error = Some(message.clone());
        self.ui_state.error_message = Some(message);
    }

    /// Drop the banner only if it still shows the selection error
    fn clear_selection_error(&mut self) {
        if let Some(stale) = self.ui_state.selection_error.take() {
            if self.ui_state.error_message.as_deref() == Some(stale.as_str()) {
                self.ui_state.error_message = None;
            }
        }
    }

    fn persist_settings(&mut self) {
        let Some(ref path) = self.settings_path else {
            return;
        };
        if let Err(e) = SettingsManager::save_to(&self.settings, path) {
            log::error!("[UI] Failed to save settings: {}", e);
            self.ui_state.error_message = Some(AppError::from(e).user_message());
        }
    }

    /// Drain forwarded log lines, keeping the newest for the status bar
    fn process_log_lines(&mut self) {
        if let Some(ref mut rx) = self.log_rx {
            while let Ok(line) = rx.try_recv() {
                self.ui_state.status_line = Some(line);
            }
        }
    }

    /// Window title: app name plus the loaded file name, if any
    pub fn window_title(&self) -> String {
        match self.controller.source().and_then(|s| s.file_name()) {
            Some(name) => format!("{} - {}", APP_TITLE, name),
            None => APP_TITLE.to_string(),
        }
    }

    fn apply_viewport_state(&mut self, ctx: &egui::Context) {
        if self.ui_state.applied_dark_mode != Some(self.settings.dark_mode) {
            ctx.set_visuals(if self.settings.dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            self.ui_state.applied_dark_mode = Some(self.settings.dark_mode);
        }

        let title = self.window_title();
        if self.ui_state.applied_title.as_deref() != Some(title.as_str()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.ui_state.applied_title = Some(title);
        }
    }

    /// Remember the window size before the viewport goes away
    fn remember_window_size(&mut self, ctx: &egui::Context) {
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.settings.window_width = rect.width();
            self.settings.window_height = rect.height();
        }
        self.persist_settings();
    }

    fn render_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open…").clicked() {
                        ui.close_menu();
                        self.open_dialog();
                    }

                    let recent = self.settings.recent_files.clone();
                    ui.add_enabled_ui(!recent.is_empty(), |ui| {
                        ui.menu_button("Open Recent", |ui| {
                            for entry in &recent {
                                if ui.button(entry).clicked() {
                                    ui.close_menu();
                                    self.open_path(Path::new(entry));
                                }
                            }
                        });
                    });

                    if ui
                        .checkbox(&mut self.settings.open_last_on_startup, "Reopen last file at startup")
                        .changed()
                    {
                        self.persist_settings();
                    }

                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ui.close_menu();
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut self.settings.dark_mode, "Dark mode").changed() {
                        self.persist_settings();
                    }
                });
            });
        });
    }

    /// Render transient messages (errors, info)
    fn render_messages(&mut self, ctx: &egui::Context) {
        if let Some(ref msg) = self.ui_state.error_message.clone() {
            egui::TopBottomPanel::top("error_panel").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(255, 100, 100), format!("Error: {}", msg));
                    if ui.button("Dismiss").clicked() {
                        self.ui_state.error_message = None;
                    }
                });
            });
        }

        if let Some(ref msg) = self.ui_state.info_message.clone() {
            egui::TopBottomPanel::top("info_panel").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(100, 150, 255), msg);
                    if ui.button("Dismiss").clicked() {
                        self.ui_state.info_message = None;
                    }
                });
            });
        }
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match (self.controller.source().and_then(|s| s.file_name()), self.controller.loaded_at()) {
                    (Some(name), Some(at)) => {
                        ui.label(format!("{} loaded at {}", name, at.format("%H:%M:%S")));
                    }
                    _ => {
                        ui.label("No results file loaded");
                    }
                }

                if let Some(ref line) = self.ui_state.status_line {
                    ui.separator();
                    let color = match line.level {
                        log::Level::Error => egui::Color32::from_rgb(255, 100, 100),
                        log::Level::Warn => egui::Color32::from_rgb(255, 200, 0),
                        _ => ui.visuals().weak_text_color(),
                    };
                    ui.colored_label(color, format!("{} {}", line.timestamp, line.message));
                }
            });
        });
    }

    fn render_panes(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();
        egui::SidePanel::left("selector_panes")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                if self.controller.dataset().is_none() {
                    ui.label("Open a benchmark results file (File → Open…)");
                    return;
                }
                for pane in [Pane::Primary, Pane::Secondary] {
                    if let Some(action) = render_pane(ui, pane, &self.controller) {
                        actions.push(action);
                    }
                    ui.add_space(8.0);
                }
            });

        for action in actions {
            self.apply_action(action);
        }
    }

    fn render_charts(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.canvas.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label("Nothing to plot");
                });
                return;
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                for target in ChartTarget::ALL {
                    render_chart(ui, &self.canvas, target);
                    ui.add_space(12.0);
                }
            });
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_log_lines();
        self.apply_viewport_state(ctx);

        self.render_menu(ctx);
        self.render_messages(ctx);
        self.render_status_bar(ctx);
        self.render_panes(ctx);
        self.render_charts(ctx);

        if ctx.input(|i| i.viewport().close_requested()) {
            self.remember_window_size(ctx);
        }

        // Log lines arrive from another thread; poll for them while idle
        ctx.request_repaint_after(std::time::Duration::from_millis(500));
    }
}
