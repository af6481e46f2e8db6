//! Unified error type hierarchy for Testbench Dashboard
//!
//! Provides structured error handling with DatasetError, SelectionError, ConfigError,
//! and AppError.

use std::io;
use thiserror::Error;

/// Benchmark results loading errors.
///
/// Any of these leaves the previously held dataset untouched.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Unable to read results file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Results file is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Malformed benchmark dataset: {0}")]
    Malformed(String),
}

impl DatasetError {
    /// True for errors raised while reading the file, as opposed to interpreting it
    pub fn is_io(&self) -> bool {
        matches!(self, DatasetError::Io { .. })
    }

    /// True for structurally invalid content (bad JSON or wrong shape)
    pub fn is_malformed(&self) -> bool {
        matches!(self, DatasetError::InvalidJson(_) | DatasetError::Malformed(_))
    }
}

/// Chart derivation attempted against a selection that resolves to no record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Selection does not resolve to a benchmark record (model: {model}, backend: {backend})")]
    Unresolved { model: String, backend: String },
}

/// Settings file parsing and persistence errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Settings file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid JSON in settings: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Settings validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error during settings operations: {0}")]
    IoError(#[from] io::Error),
}

/// Global error type surfaced by the UI layer
///
/// Every failure that reaches the user is converted into an `AppError` so the
/// banner text stays consistent.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Results file could not be read
    #[error("I/O error: {0}")]
    Io(String),

    /// Results file content has the wrong shape
    #[error("Malformed dataset: {0}")]
    MalformedDataset(String),

    /// Primary pane selection failed to resolve
    #[error("Unresolved selection: {0}")]
    UnresolvedSelection(String),

    /// Settings persist or deserialize error
    #[error("Settings error: {0}")]
    Settings(String),
}

impl AppError {
    /// Get a user-facing error message suitable for UI display
    pub fn user_message(&self) -> String {
        match self {
            AppError::Io(msg) => format!("An error occurred reading the file: {}", msg),
            AppError::MalformedDataset(msg) => format!("The file is not a valid benchmark result: {}", msg),
            AppError::UnresolvedSelection(msg) => format!("Nothing to plot for the current selection: {}", msg),
            AppError::Settings(msg) => format!("Settings error: {}", msg),
        }
    }
}

impl From<DatasetError> for AppError {
    fn from(e: DatasetError) -> Self {
        match e {
            DatasetError::Io { .. } => AppError::Io(e.to_string()),
            DatasetError::InvalidJson(inner) => AppError::MalformedDataset(inner.to_string()),
            DatasetError::Malformed(msg) => AppError::MalformedDataset(msg),
        }
    }
}

impl From<SelectionError> for AppError {
    fn from(e: SelectionError) -> Self {
        AppError::UnresolvedSelection(e.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Settings(e.to_string())
    }
}

/// Top-level result type for operations that may fail.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
