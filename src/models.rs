//! Core data types for Testbench Dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One timing observation for a single layer invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSample {
    /// Layer label. Not unique: a layer invoked several times appears several times.
    pub layer: String,
    /// Time spent in this invocation, in milliseconds
    pub time: f64,
}

impl LayerSample {
    pub fn new(layer: impl Into<String>, time: f64) -> Self {
        LayerSample {
            layer: layer.into(),
            time,
        }
    }
}

/// One benchmark run of a model on a given backend.
///
/// Within its model a record is identified by its position in the record list,
/// never by `backend`: two records may share the same type label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Backend / execution type label (e.g. "cpu_4Threads", "ArmNN")
    #[serde(rename = "type")]
    pub backend: String,
    /// Mean execution time in milliseconds, taken verbatim from the file
    pub mean_time: f64,
    /// Per-layer samples in execution order
    pub times: Vec<LayerSample>,
    /// Thread count, written by the TFLite runner only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<u32>,
}

impl ExecutionRecord {
    pub fn new(backend: impl Into<String>, mean_time: f64, times: Vec<LayerSample>) -> Self {
        ExecutionRecord {
            backend: backend.into(),
            mean_time,
            times,
            threads: None,
        }
    }

    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = Some(threads);
        self
    }
}

/// A model and its benchmark records, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntry {
    pub name: String,
    pub records: Vec<ExecutionRecord>,
}

/// Whole results file: model name -> records, keeping the file's model order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkDataset {
    models: Vec<ModelEntry>,
}

impl BenchmarkDataset {
    /// Build a dataset from entries. A repeated model name keeps its first position
    /// and takes the records of its last occurrence, mirroring JSON object semantics.
    pub fn from_entries(entries: impl IntoIterator<Item = ModelEntry>) -> Self {
        let mut models: Vec<ModelEntry> = Vec::new();
        for entry in entries {
            match models.iter_mut().find(|m| m.name == entry.name) {
                Some(existing) => existing.records = entry.records,
                None => models.push(entry),
            }
        }
        BenchmarkDataset { models }
    }

    pub fn models(&self) -> &[ModelEntry] {
        &self.models
    }

    /// Model names in insertion order
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }

    /// Records for `model`, or None if the model is not in the dataset
    pub fn records(&self, model: &str) -> Option<&[ExecutionRecord]> {
        self.models
            .iter()
            .find(|m| m.name == model)
            .map(|m| m.records.as_slice())
    }

    pub fn contains_model(&self, model: &str) -> bool {
        self.records(model).is_some()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// One of the two independent selection contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    Primary,
    Secondary,
}

impl Pane {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pane::Primary => "primary",
            Pane::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a model selector entry.
///
/// `Empty` is the secondary pane's "nothing selected" sentinel. It is a distinct
/// variant, so no model name (not even the literal "Empty") can collide with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ModelChoice {
    #[default]
    Empty,
    Model(String),
}

impl ModelChoice {
    pub const EMPTY_LABEL: &'static str = "Empty";

    pub fn model(name: impl Into<String>) -> Self {
        ModelChoice::Model(name.into())
    }

    /// Model key, if this is a real model
    pub fn key(&self) -> Option<&str> {
        match self {
            ModelChoice::Empty => None,
            ModelChoice::Model(name) => Some(name.as_str()),
        }
    }

    /// Text shown in the selector
    pub fn label(&self) -> &str {
        match self {
            ModelChoice::Empty => Self::EMPTY_LABEL,
            ModelChoice::Model(name) => name.as_str(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ModelChoice::Empty)
    }
}
