//! DashboardController: event handler layer between selectors and charts
//!
//! Owns the dataset holder and both pane selections. Every event (load, model
//! change, backend change) runs to completion: selections are updated, all
//! series are recomputed from scratch and pushed into the chart surface.

use std::path::Path;

use super::{ChartSurface, FileService};
use crate::dataset::{DatasetHolder, DatasetSource};
use crate::error::{DatasetError, SelectionError};
use crate::models::{BenchmarkDataset, ExecutionRecord, ModelChoice, Pane};
use crate::selection::{list_models, PaneSelection, SelectorOption};
use crate::series::{derive_chart_data, ChartData, ChartTarget};

/// Central state of the dashboard
#[derive(Debug)]
pub struct DashboardController {
    holder: DatasetHolder,
    primary: PaneSelection,
    secondary: PaneSelection,
    primary_models: Vec<SelectorOption<ModelChoice>>,
    secondary_models: Vec<SelectorOption<ModelChoice>>,
    chart_data: Option<ChartData>,
}

impl Default for DashboardController {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardController {
    pub fn new() -> Self {
        DashboardController {
            holder: DatasetHolder::new(),
            primary: PaneSelection::new(Pane::Primary),
            secondary: PaneSelection::new(Pane::Secondary),
            primary_models: Vec::new(),
            secondary_models: Vec::new(),
            chart_data: None,
        }
    }

    /// Read `path` through the file service and load it.
    ///
    /// On any failure the current dataset, selections and charts stay as they were.
    pub fn load_path(
        &mut self,
        path: &Path,
        files: &dyn FileService,
        surface: &mut dyn ChartSurface,
    ) -> Result<Option<SelectionError>, DatasetError> {
        log::info!("[Controller] Opening results file {}", path.display());
        let text = files.read_text(path).map_err(|e| DatasetError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let raw: serde_json::Value = serde_json::from_str(&text)?;
        self.load_value(&raw, DatasetSource::File(path.to_path_buf()), surface)
    }

    /// Load already-deserialized results.
    ///
    /// The outer error is a rejected dataset. The inner value reports a primary
    /// selection that could not be charted after an otherwise successful load.
    pub fn load_value(
        &mut self,
        raw: &serde_json::Value,
        source: DatasetSource,
        surface: &mut dyn ChartSurface,
    ) -> Result<Option<SelectionError>, DatasetError> {
        match self.holder.load_from(raw, source) {
            Ok(generation) => {
                log::info!("[Controller] Dataset generation {} committed", generation);
            }
            Err(e) => {
                log::error!("[Controller] Dataset rejected, keeping previous one: {}", e);
                return Err(e);
            }
        }
        self.on_dataset_changed();
        Ok(self.refresh(surface).err())
    }

    fn on_dataset_changed(&mut self) {
        let Some(dataset) = self.holder.current() else {
            return;
        };
        self.primary_models = list_models(dataset, Pane::Primary);
        self.secondary_models = list_models(dataset, Pane::Secondary);
        self.primary.reset(dataset);
        self.secondary.reset(dataset);
    }

    /// Model selector change. Repopulates that pane's backends (index 0 selected)
    /// and redraws everything.
    pub fn select_model(
        &mut self,
        pane: Pane,
        model: ModelChoice,
        surface: &mut dyn ChartSurface,
    ) -> Result<(), SelectionError> {
        let Some(dataset) = self.holder.current() else {
            log::warn!("[Controller] Model selected before any dataset was loaded");
            return Ok(());
        };
        match pane {
            Pane::Primary => self.primary.select_model(dataset, model),
            Pane::Secondary => self.secondary.select_model(dataset, model),
        }
        self.refresh(surface)
    }

    /// Backend selector change
    pub fn select_backend(
        &mut self,
        pane: Pane,
        index: usize,
        surface: &mut dyn ChartSurface,
    ) -> Result<(), SelectionError> {
        let accepted = match pane {
            Pane::Primary => self.primary.select_backend(index),
            Pane::Secondary => self.secondary.select_backend(index),
        };
        if !accepted {
            return Ok(());
        }
        self.refresh(surface)
    }

    /// Recompute every series and redraw all four targets.
    ///
    /// A primary selection that does not resolve clears all charts and is
    /// returned as an error.
    pub fn refresh(&mut self, surface: &mut dyn ChartSurface) -> Result<(), SelectionError> {
        let result = match self.holder.current() {
            None => Ok(None),
            Some(dataset) if dataset.is_empty() => {
                log::info!("[Controller] Dataset has no models, nothing to plot");
                Ok(None)
            }
            Some(dataset) => derive_chart_data(dataset, &self.primary, &self.secondary).map(Some),
        };

        match result {
            Ok(data) => {
                self.chart_data = data;
                self.redraw(surface);
                Ok(())
            }
            Err(e) => {
                log::error!("[Controller] Primary pane selection is unresolvable: {}", e);
                self.chart_data = None;
                self.redraw(surface);
                Err(e)
            }
        }
    }

    fn redraw(&self, surface: &mut dyn ChartSurface) {
        for target in ChartTarget::ALL {
            surface.clear(target);
            if let Some(series) = self.chart_data.as_ref().and_then(|d| d.series(target)) {
                surface.draw(target, series, &target.config());
            }
        }
    }

    pub fn dataset(&self) -> Option<&BenchmarkDataset> {
        self.holder.current()
    }

    pub fn source(&self) -> Option<&DatasetSource> {
        self.holder.source()
    }

    pub fn generation(&self) -> u64 {
        self.holder.generation()
    }

    pub fn loaded_at(&self) -> Option<chrono::DateTime<chrono::Local>> {
        self.holder.loaded_at()
    }

    pub fn selection(&self, pane: Pane) -> &PaneSelection {
        match pane {
            Pane::Primary => &self.primary,
            Pane::Secondary => &self.secondary,
        }
    }

    /// Options for a pane's model selector
    pub fn model_options(&self, pane: Pane) -> &[SelectorOption<ModelChoice>] {
        match pane {
            Pane::Primary => &self.primary_models,
            Pane::Secondary => &self.secondary_models,
        }
    }

    /// Options for a pane's backend selector
    pub fn backend_options(&self, pane: Pane) -> &[SelectorOption<usize>] {
        self.selection(pane).backends()
    }

    /// The record a pane currently points at, if any
    pub fn resolved_record(&self, pane: Pane) -> Option<&ExecutionRecord> {
        self.selection(pane).resolve(self.holder.current()?)
    }

    pub fn chart_data(&self) -> Option<&ChartData> {
        self.chart_data.as_ref()
    }

    /// Mean-time caption for a pane; empty when nothing is plotted
    pub fn mean_time_text(&self, pane: Pane) -> &str {
        match (&self.chart_data, pane) {
            (Some(data), Pane::Primary) => data.primary_mean_time.as_str(),
            (Some(data), Pane::Secondary) => data.secondary_mean_time.as_str(),
            (None, _) => "",
        }
    }
}
