//! Testbench Dashboard
//!
//! Desktop viewer for per-layer inference benchmark results. A results file maps
//! model names to execution records (one per backend run), each carrying a mean
//! execution time and the per-layer timing samples of that run.
//!
//! The system is organized into functional modules:
//! - **error**: Unified error type hierarchy
//! - **models**: Core data structures (records, dataset, panes, model choice)
//! - **dataset**: Dataset holder and results file validation
//! - **selection**: Selector options and record resolution per pane
//! - **series**: Chart series derivation (per-layer, layer summary, comparison)
//! - **config**: Persisted user settings
//! - **log_collector**: Decoupled disk/UI logging backend
//! - **ui**: Controller and egui integration

// Core foundational modules
pub mod error;
pub mod models;

// Dataset loading and selection resolution
pub mod dataset;
pub mod selection;

// Chart data derivation
pub mod series;

// Persisted settings
pub mod config;

// Robust, decoupled logging system
pub mod log_collector;

// Controller and egui frontend
pub mod ui;

// Re-export the log crate for macro usage
pub use log;

// Re-export log collector for use throughout the system
pub use log_collector::{LogCollector, LogLine};

// ============================================================================
// PUBLIC RE-EXPORTS FOR CONVENIENCE
// ============================================================================

pub use error::{AppError, ConfigError, DatasetError, Result, SelectionError};

pub use models::{BenchmarkDataset, ExecutionRecord, LayerSample, ModelChoice, ModelEntry, Pane};

pub use dataset::{DatasetHolder, DatasetSource};

pub use selection::{list_backends, list_models, resolve, PaneSelection, SelectorOption};

pub use series::{
    backend_comparison_series, derive_chart_data, format_mean_time, layer_label,
    layer_summary_series, mean_time_display, per_layer_series, ChartConfig, ChartData,
    ChartSeries, ChartTarget, SeriesPoint,
};

pub use config::{AppState, SettingsManager};

pub use ui::{ChartSurface, DashboardController, FileService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_error_reexport() {
        let _: Result<i32> = Ok(42);
        let err: AppError = SelectionError::Unresolved {
            model: "m".to_string(),
            backend: "none".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::UnresolvedSelection(_)));
    }

    #[test]
    fn test_models_reexport() {
        assert!(ModelChoice::default().is_empty());
        assert_eq!(Pane::Primary.as_str(), "primary");
    }
}
