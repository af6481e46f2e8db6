//! Dataset holder for the currently loaded benchmark results.
//!
//! The holder owns exactly one dataset at a time. A load either commits a fully
//! parsed dataset in a single assignment or fails and leaves the held value as it
//! was. Every successful load bumps a generation counter so dependents can tell the
//! dataset changed.

pub mod loader;

use crate::error::DatasetError;
use crate::models::BenchmarkDataset;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::path::PathBuf;

/// Where the held dataset came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Loaded from a results file on disk
    File(PathBuf),
    /// Handed over already deserialized
    Inline,
}

impl DatasetSource {
    /// File name for window titles, if loaded from disk
    pub fn file_name(&self) -> Option<String> {
        match self {
            DatasetSource::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().to_string()),
            DatasetSource::Inline => None,
        }
    }
}

#[derive(Debug, Clone)]
struct LoadedDataset {
    dataset: BenchmarkDataset,
    source: DatasetSource,
    loaded_at: DateTime<Local>,
}

/// Process-wide holder of the loaded dataset (owned by the controller, no globals)
#[derive(Debug, Default)]
pub struct DatasetHolder {
    current: Option<LoadedDataset>,
    generation: u64,
}

impl DatasetHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `raw` and replace the held dataset with it. Returns the new generation.
    pub fn load(&mut self, raw: &Value) -> Result<u64, DatasetError> {
        self.load_from(raw, DatasetSource::Inline)
    }

    /// Same as [`DatasetHolder::load`], recording where `raw` came from.
    pub fn load_from(&mut self, raw: &Value, source: DatasetSource) -> Result<u64, DatasetError> {
        let dataset = loader::parse_dataset(raw)?;
        Ok(self.replace(dataset, source))
    }

    /// Swap in a new dataset, returning the new generation.
    pub fn replace(&mut self, dataset: BenchmarkDataset, source: DatasetSource) -> u64 {
        log::info!(
            "[Dataset] Loaded {} model(s) from {:?}",
            dataset.len(),
            source
        );
        self.current = Some(LoadedDataset {
            dataset,
            source,
            loaded_at: Local::now(),
        });
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// The held dataset, or None before the first successful load
    pub fn current(&self) -> Option<&BenchmarkDataset> {
        self.current.as_ref().map(|loaded| &loaded.dataset)
    }

    pub fn source(&self) -> Option<&DatasetSource> {
        self.current.as_ref().map(|loaded| &loaded.source)
    }

    pub fn loaded_at(&self) -> Option<DateTime<Local>> {
        self.current.as_ref().map(|loaded| loaded.loaded_at)
    }

    /// Incremented on every successful load; 0 means nothing was ever loaded
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
