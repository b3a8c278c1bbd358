use pulmoprobe_core::models::prediction::ERROR_RISK;
use pulmoprobe_core::{FormInput, History, HistoryRecord, PredictionResult};

#[test]
fn history_appends_in_order() {
    let mut history = History::new();
    assert!(history.is_empty());

    history.push(HistoryRecord::new(
        FormInput::new().with("age", "40"),
        PredictionResult::new("Low Risk", 70.0),
    ));
    history.push(HistoryRecord::new(
        FormInput::new().with("age", "71"),
        PredictionResult::new("High Risk", 91.0),
    ));

    assert_eq!(history.len(), 2);
    assert_eq!(history.latest().map(|r| r.inputs.value("age")), Some("71"));

    let newest_first: Vec<_> = history
        .iter_newest_first()
        .map(|r| r.output.risk.as_str())
        .collect();
    assert_eq!(newest_first, vec!["High Risk", "Low Risk"]);
}

#[test]
fn records_get_distinct_ids() {
    let a = HistoryRecord::new(FormInput::new(), PredictionResult::new("Low Risk", 1.0));
    let b = HistoryRecord::new(FormInput::new(), PredictionResult::new("Low Risk", 1.0));
    assert_ne!(a.id, b.id);
}

#[test]
fn short_id_is_prefixed_and_compact() {
    let record = HistoryRecord::new(FormInput::new(), PredictionResult::new("Low Risk", 1.0));
    let id = record.short_id();
    assert_eq!(id.len(), 7);
    assert!(id.starts_with('P'));
    assert!(id[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
}

#[test]
fn failed_result_uses_error_sentinel() {
    let result = PredictionResult::failed("connection refused");
    assert_eq!(result.risk, ERROR_RISK);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.error.as_deref(), Some("connection refused"));
    assert!(result.is_error());
    assert!(!result.is_high_risk("Error"));
}

#[test]
fn prediction_result_round_trips_wire_shape() {
    let parsed: PredictionResult =
        serde_json::from_str(r#"{"risk":"High Risk","confidence":88.4}"#).unwrap();
    assert_eq!(parsed, PredictionResult::new("High Risk", 88.4));

    let json = serde_json::to_string(&parsed).unwrap();
    assert!(!json.contains("error"));
}

#[test]
fn form_input_value_trims_and_defaults_to_empty() {
    let input = FormInput::new().with("bmi", " 22.5 ");
    assert_eq!(input.value("bmi"), "22.5");
    assert_eq!(input.value("age"), "");
    assert_eq!(input.get("age"), None);
}
