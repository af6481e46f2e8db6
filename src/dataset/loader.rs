//! Results file loader and shape validation.

use crate::error::DatasetError;
use crate::models::{BenchmarkDataset, ExecutionRecord, ModelEntry};
use serde_json::Value;

/// Human-readable JSON kind for error messages
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Validate already-deserialized JSON and convert it into a dataset.
///
/// Expected shape: `{ model: [ {type, mean_time, times: [{layer, time}]} ] }`.
/// Extra fields on records are ignored.
pub fn parse_dataset(raw: &Value) -> Result<BenchmarkDataset, DatasetError> {
    let object = raw.as_object().ok_or_else(|| {
        DatasetError::Malformed(format!(
            "top-level value must be an object of model names, found {}",
            json_kind(raw)
        ))
    })?;

    let mut entries = Vec::with_capacity(object.len());
    for (name, value) in object {
        let items = value.as_array().ok_or_else(|| {
            DatasetError::Malformed(format!(
                "model '{}' must map to an array of execution records, found {}",
                name,
                json_kind(value)
            ))
        })?;

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if !item.is_object() {
                return Err(DatasetError::Malformed(format!(
                    "model '{}', record {}: expected an object, found {}",
                    name,
                    index,
                    json_kind(item)
                )));
            }
            let record: ExecutionRecord = serde_json::from_value(item.clone()).map_err(|e| {
                DatasetError::Malformed(format!("model '{}', record {}: {}", name, index, e))
            })?;
            records.push(record);
        }

        if records.is_empty() {
            log::warn!("[Dataset] Model '{}' has no execution records; backend selection disabled", name);
        }
        entries.push(ModelEntry {
            name: name.clone(),
            records,
        });
    }

    Ok(BenchmarkDataset::from_entries(entries))
}

/// Parse results file text.
pub fn parse_dataset_str(text: &str) -> Result<BenchmarkDataset, DatasetError> {
    let raw: Value = serde_json::from_str(text)?;
    parse_dataset(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_minimal_dataset() {
        let raw = json!({
            "M1": [{"type": "CPU", "mean_time": 10, "times": [{"layer": "conv", "time": 4}]}]
        });
        let ds = parse_dataset(&raw).expect("valid dataset");
        let records = ds.records("M1").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].backend, "CPU");
        assert_eq!(records[0].mean_time, 10.0);
        assert_eq!(records[0].times[0].layer, "conv");
    }

    #[test]
    fn test_top_level_array_rejected() {
        let err = parse_dataset(&json!([{"type": "CPU"}])).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("found an array"));
    }

    #[test]
    fn test_model_value_must_be_array() {
        let err = parse_dataset(&json!({"M1": {"type": "CPU"}})).unwrap_err();
        assert!(err.to_string().contains("model 'M1'"));
    }

    #[test]
    fn test_missing_mean_time_rejected() {
        let raw = json!({"M1": [{"type": "CPU", "times": []}]});
        let err = parse_dataset(&raw).unwrap_err();
        assert!(err.to_string().contains("mean_time"), "{}", err);
    }

    #[test]
    fn test_wrong_layer_time_type_rejected() {
        let raw = json!({"M1": [{"type": "CPU", "mean_time": 1, "times": [{"layer": "conv", "time": "4"}]}]});
        assert!(parse_dataset(&raw).unwrap_err().is_malformed());
    }

    #[test]
    fn test_non_object_record_rejected() {
        let raw = json!({"M1": [42]});
        let err = parse_dataset(&raw).unwrap_err();
        assert!(err.to_string().contains("record 0"));
    }

    #[test]
    fn test_empty_record_list_allowed() {
        let ds = parse_dataset(&json!({"M1": []})).unwrap();
        assert_eq!(ds.records("M1").map(|r| r.len()), Some(0));
    }

    #[test]
    fn test_model_order_follows_file() {
        let ds = parse_dataset_str(r#"{"zz": [], "aa": [], "mm": []}"#).unwrap();
        let names: Vec<&str> = ds.model_names().collect();
        assert_eq!(names, vec!["zz", "aa", "mm"]);
    }

    #[test]
    fn test_invalid_json_text() {
        let err = parse_dataset_str("{ not json").unwrap_err();
        assert!(matches!(err, DatasetError::InvalidJson(_)));
    }

    #[test]
    fn test_runner_output_with_threads() {
        let text = r#"{"net": [
            {"type": "cpu_4Threads", "mean_time": 2.5, "times": [], "threads": 4},
            {"type": "ArmNN", "mean_time": 1.5, "times": []}
        ]}"#;
        let ds = parse_dataset_str(text).unwrap();
        let records = ds.records("net").unwrap();
        assert_eq!(records[0].threads, Some(4));
        assert_eq!(records[1].threads, None);
    }

    #[test]
    fn test_fractional_threads_rejected() {
        let raw = json!({"net": [{"type": "cpu", "mean_time": 1, "times": [], "threads": 1.5}]});
        assert!(parse_dataset(&raw).unwrap_err().is_malformed());
    }
}
