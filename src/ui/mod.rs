//! UI Module - egui integration and DashboardController
//!
//! Handles the interface between the dataset/series logic and the egui frontend.
//! The controller talks to its collaborators only through the traits below, so
//! it can be driven in tests without a window.

pub mod controller;
pub mod app;
pub mod charts;
pub mod panes;

use crate::series::{ChartConfig, ChartSeries, ChartTarget};
use std::io;
use std::path::{Path, PathBuf};

pub use controller::DashboardController;
pub use app::{DashboardApp, UIState};
pub use charts::ChartCanvas;

/// Trait for the file picker and raw file reading
pub trait FileService {
    /// Ask the user for a results file; None if the dialog was cancelled
    fn open_file(&self, start_dir: Option<&Path>) -> Option<PathBuf>;

    fn read_text(&self, path: &Path) -> io::Result<String>;
}

/// Trait for a surface able to draw bar charts into named targets
pub trait ChartSurface {
    fn clear(&mut self, target: ChartTarget);

    fn draw(&mut self, target: ChartTarget, series: &ChartSeries, config: &ChartConfig);
}

/// Production FileService: native dialog via rfd, plain filesystem reads
pub struct DialogFileService;

impl FileService for DialogFileService {
    fn open_file(&self, start_dir: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Open benchmark results")
            .add_filter("JSON", &["json"])
            .add_filter("All files", &["*"]);
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_file()
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}
