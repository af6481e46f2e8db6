//! Series builder: turns benchmark records into chart series.
//!
//! Everything here is a pure function of the dataset and the pane selections.
//! Nothing draws; the controller hands the result to a [`crate::ui::ChartSurface`].

use crate::error::SelectionError;
use crate::models::{BenchmarkDataset, ExecutionRecord};
use crate::selection::PaneSelection;
use std::collections::HashMap;

/// A single bar: category label and its value in milliseconds
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        SeriesPoint {
            label: label.into(),
            value,
        }
    }
}

/// An ordered list of bars, optionally named (legend text)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    pub name: Option<String>,
    pub points: Vec<SeriesPoint>,
}

impl ChartSeries {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        ChartSeries { name: None, points }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// (label, value) pairs, handy for comparisons in tests and logs
    pub fn pairs(&self) -> Vec<(&str, f64)> {
        self.points.iter().map(|p| (p.label.as_str(), p.value)).collect()
    }

    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Title and axis captions of a chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    pub title: &'static str,
    pub x_axis: &'static str,
    pub y_axis: &'static str,
}

/// The four draw targets of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartTarget {
    PrimaryPerLayer,
    SecondaryPerLayer,
    LayerSummary,
    BackendComparison,
}

impl ChartTarget {
    /// Draw order on screen
    pub const ALL: [ChartTarget; 4] = [
        ChartTarget::PrimaryPerLayer,
        ChartTarget::SecondaryPerLayer,
        ChartTarget::LayerSummary,
        ChartTarget::BackendComparison,
    ];

    pub fn config(&self) -> ChartConfig {
        match self {
            ChartTarget::PrimaryPerLayer | ChartTarget::SecondaryPerLayer => ChartConfig {
                title: "Time Per Layer",
                x_axis: "Layers",
                y_axis: "Time (ms)",
            },
            ChartTarget::LayerSummary => ChartConfig {
                title: "Time Summary Per Layer",
                x_axis: "Layers",
                y_axis: "Time (ms)",
            },
            ChartTarget::BackendComparison => ChartConfig {
                title: "Comparison between execution places",
                x_axis: "Type of execution",
                y_axis: "Time (ms)",
            },
        }
    }

    /// Stable id for egui widgets
    pub fn id(&self) -> &'static str {
        match self {
            ChartTarget::PrimaryPerLayer => "chart_primary_per_layer",
            ChartTarget::SecondaryPerLayer => "chart_secondary_per_layer",
            ChartTarget::LayerSummary => "chart_layer_summary",
            ChartTarget::BackendComparison => "chart_backend_comparison",
        }
    }
}

/// Everything the charts and pane captions need after one recomputation
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub primary_per_layer: ChartSeries,
    /// None when the secondary pane resolves to nothing
    pub secondary_per_layer: Option<ChartSeries>,
    pub layer_summary: ChartSeries,
    pub backend_comparison: ChartSeries,
    pub primary_mean_time: String,
    /// Empty string when the secondary pane resolves to nothing
    pub secondary_mean_time: String,
}

impl ChartData {
    /// Series for a draw target, None if that target has nothing to show
    pub fn series(&self, target: ChartTarget) -> Option<&ChartSeries> {
        match target {
            ChartTarget::PrimaryPerLayer => Some(&self.primary_per_layer),
            ChartTarget::SecondaryPerLayer => self.secondary_per_layer.as_ref(),
            ChartTarget::LayerSummary => Some(&self.layer_summary),
            ChartTarget::BackendComparison => Some(&self.backend_comparison),
        }
    }
}

/// Per-layer bar label: layer name plus its position, zero-padded to two digits.
pub fn layer_label(layer: &str, index: usize) -> String {
    format!("{}_{:02}", layer, index)
}

/// One bar per layer sample, in execution order.
pub fn per_layer_series(record: &ExecutionRecord) -> ChartSeries {
    ChartSeries::new(
        record
            .times
            .iter()
            .enumerate()
            .map(|(i, sample)| SeriesPoint::new(layer_label(&sample.layer, i), sample.time))
            .collect(),
    )
}

/// Total time per distinct layer label, in order of first appearance.
pub fn layer_summary_series(record: &ExecutionRecord) -> ChartSeries {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut points: Vec<SeriesPoint> = Vec::new();

    for sample in &record.times {
        match slots.get(sample.layer.as_str()) {
            Some(&slot) => points[slot].value += sample.time,
            None => {
                slots.insert(sample.layer.as_str(), points.len());
                points.push(SeriesPoint::new(sample.layer.as_str(), sample.time));
            }
        }
    }

    ChartSeries::new(points)
}

/// Mean time of every record of a model, labelled by backend type.
pub fn backend_comparison_series(records: &[ExecutionRecord]) -> ChartSeries {
    ChartSeries::new(
        records
            .iter()
            .map(|record| SeriesPoint::new(record.backend.as_str(), record.mean_time))
            .collect(),
    )
}

pub fn format_mean_time(mean_time: f64) -> String {
    format!("Mean execution time: {}ms", mean_time)
}

/// Mean-time caption; empty when there is no record to describe.
pub fn mean_time_display(record: Option<&ExecutionRecord>) -> String {
    record
        .map(|r| format_mean_time(r.mean_time))
        .unwrap_or_default()
}

fn unresolved(selection: &PaneSelection) -> SelectionError {
    SelectionError::Unresolved {
        model: selection.model().label().to_string(),
        backend: selection
            .backend()
            .map(|index| index.to_string())
            .unwrap_or_else(|| "none".to_string()),
    }
}

/// Recompute every chart from scratch.
///
/// The primary selection must resolve; the secondary one may be empty.
/// The comparison chart always spans all records of the primary model.
pub fn derive_chart_data(
    dataset: &BenchmarkDataset,
    primary: &PaneSelection,
    secondary: &PaneSelection,
) -> Result<ChartData, SelectionError> {
    let record = primary.resolve(dataset).ok_or_else(|| unresolved(primary))?;
    let model = primary.model().label();
    let siblings = primary
        .model()
        .key()
        .and_then(|key| dataset.records(key))
        .unwrap_or(std::slice::from_ref(record));

    let secondary_record = secondary.resolve(dataset);
    let secondary_per_layer = secondary_record.map(|r| {
        per_layer_series(r).named(format!("{} {}", secondary.model().label(), r.backend))
    });

    Ok(ChartData {
        primary_per_layer: per_layer_series(record).named(format!("{} {}", model, record.backend)),
        secondary_per_layer,
        layer_summary: layer_summary_series(record),
        backend_comparison: backend_comparison_series(siblings),
        primary_mean_time: format_mean_time(record.mean_time),
        secondary_mean_time: mean_time_display(secondary_record),
    })
}
