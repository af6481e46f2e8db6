//! Selection resolver: selector option lists and (model, backend) lookup.
//!
//! A backend is identified by its index in the model's record list. The index is
//! the selector value; the record's `type` string is only the display label, so
//! duplicate or reordered type labels stay distinguishable.

use crate::models::{BenchmarkDataset, ExecutionRecord, ModelChoice, Pane};

/// One entry of a selector widget: the value reported on change plus its label
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorOption<V> {
    pub value: V,
    pub label: String,
}

impl<V> SelectorOption<V> {
    pub fn new(value: V, label: impl Into<String>) -> Self {
        SelectorOption {
            value,
            label: label.into(),
        }
    }
}

/// Model selector options for a pane, in dataset order.
///
/// The secondary pane gets the `Empty` sentinel first.
pub fn list_models(dataset: &BenchmarkDataset, pane: Pane) -> Vec<SelectorOption<ModelChoice>> {
    let sentinel = match pane {
        Pane::Primary => None,
        Pane::Secondary => Some(SelectorOption::new(ModelChoice::Empty, ModelChoice::EMPTY_LABEL)),
    };

    sentinel
        .into_iter()
        .chain(
            dataset
                .model_names()
                .map(|name| SelectorOption::new(ModelChoice::model(name), name)),
        )
        .collect()
}

/// Backend selector options for `model`: one `(index, type)` per record.
///
/// Empty for the sentinel, an unknown model, or a model without records.
pub fn list_backends(dataset: &BenchmarkDataset, model: &ModelChoice) -> Vec<SelectorOption<usize>> {
    model
        .key()
        .and_then(|key| dataset.records(key))
        .map(|records| {
            records
                .iter()
                .enumerate()
                .map(|(index, record)| SelectorOption::new(index, record.backend.as_str()))
                .collect()
        })
        .unwrap_or_default()
}

/// Look up the record at `backend` for `model`.
pub fn resolve<'a>(
    dataset: &'a BenchmarkDataset,
    model: &ModelChoice,
    backend: Option<usize>,
) -> Option<&'a ExecutionRecord> {
    let records = dataset.records(model.key()?)?;
    records.get(backend?)
}

/// Model + backend selection of one pane, with its current backend options.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneSelection {
    pane: Pane,
    model: ModelChoice,
    backend: Option<usize>,
    backends: Vec<SelectorOption<usize>>,
}

impl PaneSelection {
    pub fn new(pane: Pane) -> Self {
        PaneSelection {
            pane,
            model: ModelChoice::Empty,
            backend: None,
            backends: Vec::new(),
        }
    }

    /// Re-initialize after a dataset load: the primary pane takes the first model,
    /// the secondary pane goes back to the sentinel.
    pub fn reset(&mut self, dataset: &BenchmarkDataset) {
        let initial = match self.pane {
            Pane::Primary => dataset
                .model_names()
                .next()
                .map(ModelChoice::model)
                .unwrap_or_default(),
            Pane::Secondary => ModelChoice::Empty,
        };
        self.select_model(dataset, initial);
    }

    /// Change the model. The backend list is repopulated and the first backend
    /// (index 0) becomes the selection, if there is one.
    pub fn select_model(&mut self, dataset: &BenchmarkDataset, model: ModelChoice) {
        self.backends = list_backends(dataset, &model);
        self.backend = self.backends.first().map(|option| option.value);
        log::debug!(
            "[Selection] {} pane -> model '{}', {} backend(s)",
            self.pane,
            model.label(),
            self.backends.len()
        );
        self.model = model;
    }

    /// Change the backend. Out-of-range indices are rejected and leave the
    /// selection unchanged.
    pub fn select_backend(&mut self, index: usize) -> bool {
        if index < self.backends.len() {
            self.backend = Some(index);
            true
        } else {
            log::warn!(
                "[Selection] {} pane: backend index {} out of range ({} available)",
                self.pane,
                index,
                self.backends.len()
            );
            false
        }
    }

    pub fn resolve<'a>(&self, dataset: &'a BenchmarkDataset) -> Option<&'a ExecutionRecord> {
        resolve(dataset, &self.model, self.backend)
    }

    pub fn pane(&self) -> Pane {
        self.pane
    }

    pub fn model(&self) -> &ModelChoice {
        &self.model
    }

    pub fn backend(&self) -> Option<usize> {
        self.backend
    }

    pub fn backends(&self) -> &[SelectorOption<usize>] {
        &self.backends
    }

    /// Label of the selected backend, for selector headers
    pub fn backend_label(&self) -> Option<&str> {
        let index = self.backend?;
        self.backends.get(index).map(|option| option.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::parse_dataset;
    use serde_json::json;

    fn dataset() -> BenchmarkDataset {
        parse_dataset(&json!({
            "mobilenet": [
                {"type": "cpu_4Threads", "mean_time": 12.0, "times": []},
                {"type": "gpu_4Threads", "mean_time": 6.0, "times": []},
                {"type": "cpu_4Threads", "mean_time": 11.0, "times": []}
            ],
            "inception": [
                {"type": "ArmNN", "mean_time": 40.0, "times": []}
            ],
            "hollow": []
        }))
        .unwrap()
    }

    #[test]
    fn test_list_models_primary() {
        let labels: Vec<String> = list_models(&dataset(), Pane::Primary)
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, vec!["mobilenet", "inception", "hollow"]);
    }

    #[test]
    fn test_list_models_secondary_has_sentinel_first() {
        let options = list_models(&dataset(), Pane::Secondary);
        assert_eq!(options.len(), 4);
        assert_eq!(options[0].value, ModelChoice::Empty);
        assert_eq!(options[0].label, "Empty");
        assert_eq!(options[1].value, ModelChoice::model("mobilenet"));
    }

    #[test]
    fn test_list_backends_uses_positions() {
        let options = list_backends(&dataset(), &ModelChoice::model("mobilenet"));
        let values: Vec<usize> = options.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![0, 1, 2]);
        // duplicate type labels remain separate entries
        assert_eq!(options[0].label, options[2].label);
    }

    #[test]
    fn test_list_backends_empty_cases() {
        let ds = dataset();
        assert!(list_backends(&ds, &ModelChoice::Empty).is_empty());
        assert!(list_backends(&ds, &ModelChoice::model("missing")).is_empty());
        assert!(list_backends(&ds, &ModelChoice::model("hollow")).is_empty());
    }

    #[test]
    fn test_resolve() {
        let ds = dataset();
        let m = ModelChoice::model("mobilenet");
        assert_eq!(resolve(&ds, &m, Some(2)).map(|r| r.mean_time), Some(11.0));
        assert!(resolve(&ds, &m, Some(3)).is_none());
        assert!(resolve(&ds, &m, None).is_none());
        assert!(resolve(&ds, &ModelChoice::Empty, Some(0)).is_none());
        assert!(resolve(&ds, &ModelChoice::model("missing"), Some(0)).is_none());
    }

    #[test]
    fn test_select_model_resets_backend_to_first() {
        let ds = dataset();
        let mut sel = PaneSelection::new(Pane::Primary);
        sel.reset(&ds);
        assert_eq!(sel.model(), &ModelChoice::model("mobilenet"));
        assert!(sel.select_backend(2));
        sel.select_model(&ds, ModelChoice::model("inception"));
        assert_eq!(sel.backend(), Some(0));
        assert_eq!(sel.backend_label(), Some("ArmNN"));
    }

    #[test]
    fn test_select_backend_out_of_range_rejected() {
        let ds = dataset();
        let mut sel = PaneSelection::new(Pane::Primary);
        sel.reset(&ds);
        assert!(!sel.select_backend(7));
        assert_eq!(sel.backend(), Some(0));
    }

    #[test]
    fn test_secondary_reset_to_sentinel() {
        let ds = dataset();
        let mut sel = PaneSelection::new(Pane::Secondary);
        sel.select_model(&ds, ModelChoice::model("inception"));
        sel.reset(&ds);
        assert!(sel.model().is_empty());
        assert!(sel.backends().is_empty());
        assert!(sel.resolve(&ds).is_none());
    }

    #[test]
    fn test_model_without_records_has_no_backend() {
        let ds = dataset();
        let mut sel = PaneSelection::new(Pane::Primary);
        sel.select_model(&ds, ModelChoice::model("hollow"));
        assert_eq!(sel.backend(), None);
        assert!(sel.resolve(&ds).is_none());
    }
}
