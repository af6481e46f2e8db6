//! Integration tests for the dashboard controller
//!
//! Drives DashboardController through its collaborator traits only: an
//! in-memory FileService and a recording ChartSurface.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use testbench_dashboard::ui::ChartCanvas;
use testbench_dashboard::{
    ChartConfig, ChartSeries, ChartSurface, ChartTarget, DashboardController, DatasetError,
    DatasetSource, FileService, ModelChoice, Pane, SelectionError,
};

#[derive(Default)]
struct MemoryFiles {
    files: HashMap<PathBuf, String>,
}

impl MemoryFiles {
    fn with(mut self, path: &str, text: &str) -> Self {
        self.files.insert(PathBuf::from(path), text.to_string());
        self
    }
}

impl FileService for MemoryFiles {
    fn open_file(&self, _start_dir: Option<&Path>) -> Option<PathBuf> {
        None
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
    }
}

/// Records every surface call in order
#[derive(Default)]
struct RecordingSurface {
    calls: Vec<(ChartTarget, Option<usize>)>,
}

impl ChartSurface for RecordingSurface {
    fn clear(&mut self, target: ChartTarget) {
        self.calls.push((target, None));
    }

    fn draw(&mut self, target: ChartTarget, series: &ChartSeries, _config: &ChartConfig) {
        self.calls.push((target, Some(series.len())));
    }
}

const TFLITE_RUN: &str = r#"{
    "mobilenet_v1": [
        {"type": "cpu_1Threads", "mean_time": 30.25, "threads": 1, "times": [
            {"layer": "CONV_2D", "time": 10}, {"layer": "DEPTHWISE_CONV_2D", "time": 5},
            {"layer": "CONV_2D", "time": 15}
        ]},
        {"type": "cpu_4Threads", "mean_time": 11.5, "threads": 4, "times": [
            {"layer": "CONV_2D", "time": 4}, {"layer": "DEPTHWISE_CONV_2D", "time": 2},
            {"layer": "CONV_2D", "time": 5}
        ]},
        {"type": "ArmNN", "mean_time": 9, "times": [{"layer": "CONV_2D", "time": 9}]}
    ],
    "squeezenet": [
        {"type": "cpu_4Threads", "mean_time": 7, "threads": 4, "times": [{"layer": "FIRE", "time": 7}]}
    ]
}"#;

fn loaded() -> (DashboardController, ChartCanvas) {
    let files = MemoryFiles::default().with("/runs/tflite.json", TFLITE_RUN);
    let mut controller = DashboardController::new();
    let mut canvas = ChartCanvas::new();
    let outcome = controller
        .load_path(Path::new("/runs/tflite.json"), &files, &mut canvas)
        .unwrap();
    assert!(outcome.is_none());
    (controller, canvas)
}

#[test]
fn test_unreadable_file_is_io_error() {
    let mut controller = DashboardController::new();
    let mut canvas = ChartCanvas::new();
    let err = controller
        .load_path(Path::new("/missing.json"), &MemoryFiles::default(), &mut canvas)
        .unwrap_err();
    assert!(err.is_io());
    assert!(err.to_string().contains("/missing.json"));
    assert!(controller.dataset().is_none());
}

#[test]
fn test_invalid_json_keeps_previous_dataset() {
    let (mut controller, mut canvas) = loaded();
    let files = MemoryFiles::default().with("/runs/truncated.json", r#"{"mobilenet_v1": ["#);

    let err = controller
        .load_path(Path::new("/runs/truncated.json"), &files, &mut canvas)
        .unwrap_err();
    assert!(matches!(err, DatasetError::InvalidJson(_)));
    assert_eq!(controller.generation(), 1);
    assert_eq!(
        controller.source(),
        Some(&DatasetSource::File(PathBuf::from("/runs/tflite.json")))
    );
    assert!(canvas.get(ChartTarget::PrimaryPerLayer).is_some());
}

#[test]
fn test_backend_change_redraws_every_target() {
    let (mut controller, _) = loaded();
    let mut surface = RecordingSurface::default();

    controller.select_backend(Pane::Primary, 1, &mut surface).unwrap();

    let targets: Vec<ChartTarget> = surface.calls.iter().map(|(t, _)| *t).collect();
    for target in ChartTarget::ALL {
        assert!(targets.contains(&target));
    }
    assert!(surface
        .calls
        .contains(&(ChartTarget::BackendComparison, Some(3))));
    assert_eq!(controller.mean_time_text(Pane::Primary), "Mean execution time: 11.5ms");
    assert_eq!(controller.resolved_record(Pane::Primary).and_then(|r| r.threads), Some(4));
}

#[test]
fn test_out_of_range_backend_is_ignored() {
    let (mut controller, _) = loaded();
    let mut surface = RecordingSurface::default();

    controller.select_backend(Pane::Primary, 3, &mut surface).unwrap();
    assert!(surface.calls.is_empty());
    assert_eq!(controller.selection(Pane::Primary).backend(), Some(0));
}

#[test]
fn test_model_change_resets_backend_to_first() {
    let (mut controller, mut canvas) = loaded();
    controller.select_backend(Pane::Primary, 2, &mut canvas).unwrap();
    controller
        .select_model(Pane::Primary, ModelChoice::model("squeezenet"), &mut canvas)
        .unwrap();

    assert_eq!(controller.selection(Pane::Primary).backend(), Some(0));
    let labels: Vec<&str> = controller
        .backend_options(Pane::Primary)
        .iter()
        .map(|o| o.label.as_str())
        .collect();
    assert_eq!(labels, vec!["cpu_4Threads"]);
    let comparison = canvas.get(ChartTarget::BackendComparison).map(|(s, _)| s.pairs());
    assert_eq!(comparison, Some(vec![("cpu_4Threads", 7.0)]));
}

#[test]
fn test_secondary_sentinel_round_trip() {
    let (mut controller, mut canvas) = loaded();
    controller
        .select_model(Pane::Secondary, ModelChoice::model("mobilenet_v1"), &mut canvas)
        .unwrap();
    controller.select_backend(Pane::Secondary, 2, &mut canvas).unwrap();
    assert_eq!(
        canvas.get(ChartTarget::SecondaryPerLayer).map(|(s, _)| s.pairs()),
        Some(vec![("CONV_2D_00", 9.0)])
    );

    controller
        .select_model(Pane::Secondary, ModelChoice::Empty, &mut canvas)
        .unwrap();
    assert!(controller.backend_options(Pane::Secondary).is_empty());
    assert!(canvas.get(ChartTarget::SecondaryPerLayer).is_none());
    assert_eq!(controller.mean_time_text(Pane::Secondary), "");
    assert!(canvas.get(ChartTarget::PrimaryPerLayer).is_some());
}

#[test]
fn test_model_named_empty_is_a_real_model() {
    let files = MemoryFiles::default().with(
        "/runs/odd.json",
        r#"{"Empty": [{"type": "cpu", "mean_time": 1, "times": []}]}"#,
    );
    let mut controller = DashboardController::new();
    let mut canvas = ChartCanvas::new();
    controller
        .load_path(Path::new("/runs/odd.json"), &files, &mut canvas)
        .unwrap();

    let options = controller.model_options(Pane::Secondary);
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].value, ModelChoice::Empty);
    assert_eq!(options[1].value, ModelChoice::model("Empty"));

    controller
        .select_model(Pane::Secondary, ModelChoice::model("Empty"), &mut canvas)
        .unwrap();
    assert_eq!(controller.mean_time_text(Pane::Secondary), "Mean execution time: 1ms");
}

#[test]
fn test_unresolvable_primary_clears_charts() {
    let files = MemoryFiles::default().with(
        "/runs/partial.json",
        r#"{"pending": [], "done": [{"type": "cpu", "mean_time": 3, "times": []}]}"#,
    );
    let mut controller = DashboardController::new();
    let mut canvas = ChartCanvas::new();
    let outcome = controller
        .load_path(Path::new("/runs/partial.json"), &files, &mut canvas)
        .unwrap();
    assert!(matches!(outcome, Some(SelectionError::Unresolved { .. })));
    assert!(canvas.is_empty());

    controller
        .select_model(Pane::Primary, ModelChoice::model("done"), &mut canvas)
        .unwrap();
    assert!(canvas.get(ChartTarget::BackendComparison).is_some());
}
